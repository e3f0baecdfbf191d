use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tauri::{plugin::PluginApi, AppHandle, Runtime};

use crate::client::BillingClient;
use crate::models::*;

pub fn init<R: Runtime, C: DeserializeOwned>(
    _app: &AppHandle<R>,
    _api: PluginApi<R, C>,
) -> crate::Result<Unsupported> {
    Ok(Unsupported)
}

/// Desktop stand-in: reports billing as unavailable.
pub struct Unsupported;

#[async_trait]
impl BillingClient for Unsupported {
    fn is_supported(&self) -> bool {
        false
    }

    async fn connect(&self) -> crate::Result<bool> {
        Err(crate::Error::NotSupported)
    }

    async fn disconnect(&self) -> crate::Result<()> {
        Err(crate::Error::NotSupported)
    }

    async fn get_product_info(
        &self,
        _item_type: ItemType,
        _product_ids: &[String],
    ) -> crate::Result<Vec<Product>> {
        Err(crate::Error::NotSupported)
    }

    async fn get_purchases(&self, _item_type: ItemType) -> crate::Result<Vec<Purchase>> {
        Err(crate::Error::NotSupported)
    }

    async fn purchase(
        &self,
        _product_id: &str,
        _item_type: ItemType,
    ) -> crate::Result<Option<Purchase>> {
        Err(crate::Error::NotSupported)
    }

    async fn acknowledge_purchase(&self, _purchase_token: &str) -> crate::Result<bool> {
        Err(crate::Error::NotSupported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Iap;
    use std::sync::Arc;

    #[tokio::test]
    async fn desktop_reports_no_billing() {
        let iap = Iap::new(Arc::new(Unsupported));

        assert!(iap
            .get_available_products(ItemType::InAppPurchase, &["coins".to_string()])
            .await
            .unwrap()
            .is_none());
        assert!(iap.get_purchases(ItemType::Subscription).await.unwrap().is_none());
        assert!(iap.purchase_item(ItemType::InAppPurchase, "coins", false).await.is_none());
    }

    #[tokio::test]
    async fn direct_calls_fail_with_not_supported() {
        let err = Unsupported.connect().await.unwrap_err();
        assert!(matches!(err, crate::Error::NotSupported));
    }
}
