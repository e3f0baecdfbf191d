use serde::{Deserialize, Serialize};

pub const DEFAULT_PURCHASE_EVENT: &str = "billing://purchase";

/// Plugin configuration, read from `plugins.billing` in `tauri.conf.json`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Event emitted with every new, acknowledged purchase.
    pub purchase_event: String,
    /// When disabled, purchases are reported without being acknowledged.
    pub acknowledge_purchases: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            purchase_event: DEFAULT_PURCHASE_EVENT.to_string(),
            acknowledge_purchases: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: Config = serde_json::from_value(json!({ "acknowledgePurchases": false })).unwrap();
        assert_eq!(config.purchase_event, DEFAULT_PURCHASE_EVENT);
        assert!(!config.acknowledge_purchases);
    }

    #[test]
    fn absent_plugin_section_is_none() {
        let config: Option<Config> = serde_json::from_value(serde_json::Value::Null).unwrap();
        assert!(config.is_none());
    }
}
