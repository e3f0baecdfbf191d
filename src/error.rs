use serde::{ser::Serializer, Serialize};

use crate::models::PurchaseErrorKind;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
  #[error(transparent)]
  Io(#[from] std::io::Error),
  #[cfg(mobile)]
  #[error(transparent)]
  PluginInvoke(#[from] tauri::plugin::mobile::PluginInvokeError),
  #[error("in-app billing is not supported on this platform")]
  NotSupported,
  /// A billing failure the client could classify.
  #[error("purchase failed ({kind:?}): {message}")]
  Purchase {
    kind: PurchaseErrorKind,
    message: String,
  },
}

impl Error {
  pub fn purchase(kind: PurchaseErrorKind, message: impl Into<String>) -> Self {
    Self::Purchase {
      kind,
      message: message.into(),
    }
  }

  /// Builds a [`Error::Purchase`] from a native rejection whose code names a
  /// [`PurchaseErrorKind`]. Other codes are left to the caller.
  pub fn from_rejection(code: Option<&str>, message: Option<&str>) -> Option<Self> {
    let kind = PurchaseErrorKind::from_code(code?)?;
    Some(Self::purchase(kind, message.unwrap_or_default()))
  }
}

impl Serialize for Error {
  fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    serializer.serialize_str(self.to_string().as_ref())
  }
}
