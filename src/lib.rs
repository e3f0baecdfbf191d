use std::sync::Arc;

use tauri::{
  plugin::{Builder, TauriPlugin},
  Emitter, Manager, Runtime,
};

pub use client::BillingClient;
pub use config::Config;
pub use iap::Iap;
pub use models::*;

#[cfg(desktop)]
mod desktop;
#[cfg(mobile)]
mod mobile;

mod client;
mod commands;
mod config;
mod error;
mod iap;
mod models;

pub use error::{Error, Result};

/// Extensions to [`tauri::App`], [`tauri::AppHandle`] and [`tauri::Window`] to access the billing APIs.
pub trait BillingExt<R: Runtime> {
  fn billing(&self) -> &Iap;
}

impl<R: Runtime, T: Manager<R>> crate::BillingExt<R> for T {
  fn billing(&self) -> &Iap {
    self.state::<Iap>().inner()
  }
}

/// Initializes the plugin.
pub fn init<R: Runtime>() -> TauriPlugin<R, Option<Config>> {
  Builder::<R, Option<Config>>::new("billing")
    .invoke_handler(tauri::generate_handler![
      commands::get_available_products,
      commands::get_purchases,
      commands::purchase_item,
      commands::restore_item,
    ])
    .setup(|app, api| {
      let config = api.config().clone().unwrap_or_default();
      #[cfg(mobile)]
      let client: Arc<dyn BillingClient> = Arc::new(mobile::init(app, api)?);
      #[cfg(desktop)]
      let client: Arc<dyn BillingClient> = Arc::new(desktop::init(app, api)?);

      let iap = Iap::with_config(client, &config);
      let handle = app.clone();
      let event = config.purchase_event;
      iap.on_purchase(move |purchase| {
        if let Err(err) = handle.emit(&event, purchase) {
          tracing::warn!(event = %event, error = %err, "failed to emit purchase event");
        }
      });
      app.manage(iap);
      Ok(())
    })
    .build()
}
