use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tauri::{
    plugin::{mobile::PluginInvokeError, PluginApi, PluginHandle},
    AppHandle, Runtime,
};

use crate::client::BillingClient;
use crate::models::*;

#[cfg(target_os = "android")]
const PLUGIN_IDENTIFIER: &str = "app.tauri.billing";

#[cfg(target_os = "ios")]
tauri::ios_plugin_binding!(init_plugin_billing);

// registers the Kotlin or Swift plugin classes
pub fn init<R: Runtime, C: DeserializeOwned>(
    _app: &AppHandle<R>,
    api: PluginApi<R, C>,
) -> crate::Result<NativeBilling<R>> {
    #[cfg(target_os = "android")]
    let handle = api.register_android_plugin(PLUGIN_IDENTIFIER, "BillingPlugin")?;
    #[cfg(target_os = "ios")]
    let handle = api.register_ios_plugin(init_plugin_billing)?;

    Ok(NativeBilling(handle))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProductInfoRequest {
    item_type: ItemType,
    product_ids: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PurchasesRequest {
    item_type: ItemType,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PurchaseRequest {
    product_id: String,
    item_type: ItemType,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AcknowledgePurchaseRequest {
    purchase_token: String,
}

#[derive(Deserialize)]
struct ConnectResponse {
    connected: bool,
}

#[derive(Deserialize)]
struct AcknowledgePurchaseResponse {
    success: bool,
}

#[derive(Deserialize)]
struct ProductsPayload {
    products: Vec<Product>,
}

#[derive(Deserialize)]
struct PurchasesPayload {
    purchases: Vec<Purchase>,
}

#[derive(Deserialize)]
struct PurchasePayload {
    purchase: Option<Purchase>,
}

/// Native rejections carrying a known billing error code become
/// [`crate::Error::Purchase`]; everything else stays a plugin error.
fn into_error(err: PluginInvokeError) -> crate::Error {
    if let PluginInvokeError::InvokeRejected(response) = &err {
        if let Some(purchase_err) =
            crate::Error::from_rejection(response.code.as_deref(), response.message.as_deref())
        {
            return purchase_err;
        }
    }
    err.into()
}

/// Billing client backed by the native store plugin.
pub struct NativeBilling<R: Runtime>(PluginHandle<R>);

#[async_trait]
impl<R: Runtime> BillingClient for NativeBilling<R> {
    fn is_supported(&self) -> bool {
        true
    }

    async fn connect(&self) -> crate::Result<bool> {
        self.0
            .run_mobile_plugin_async::<ConnectResponse>("connect", ())
            .await
            .map(|res| res.connected)
            .map_err(into_error)
    }

    async fn disconnect(&self) -> crate::Result<()> {
        self.0
            .run_mobile_plugin_async::<serde_json::Value>("disconnect", ())
            .await
            .map(|_| ())
            .map_err(into_error)
    }

    async fn get_product_info(
        &self,
        item_type: ItemType,
        product_ids: &[String],
    ) -> crate::Result<Vec<Product>> {
        let request = ProductInfoRequest {
            item_type,
            product_ids: product_ids.to_vec(),
        };
        self.0
            .run_mobile_plugin_async::<ProductsPayload>("getProductInfo", request)
            .await
            .map(|res| res.products)
            .map_err(into_error)
    }

    async fn get_purchases(&self, item_type: ItemType) -> crate::Result<Vec<Purchase>> {
        self.0
            .run_mobile_plugin_async::<PurchasesPayload>("getPurchases", PurchasesRequest { item_type })
            .await
            .map(|res| res.purchases)
            .map_err(into_error)
    }

    async fn purchase(
        &self,
        product_id: &str,
        item_type: ItemType,
    ) -> crate::Result<Option<Purchase>> {
        let request = PurchaseRequest {
            product_id: product_id.to_string(),
            item_type,
        };
        self.0
            .run_mobile_plugin_async::<PurchasePayload>("purchase", request)
            .await
            .map(|res| res.purchase)
            .map_err(into_error)
    }

    async fn acknowledge_purchase(&self, purchase_token: &str) -> crate::Result<bool> {
        let request = AcknowledgePurchaseRequest {
            purchase_token: purchase_token.to_string(),
        };
        self.0
            .run_mobile_plugin_async::<AcknowledgePurchaseResponse>("acknowledgePurchase", request)
            .await
            .map(|res| res.success)
            .map_err(into_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tauri::plugin::mobile::ErrorResponse;

    fn rejected(code: &str) -> PluginInvokeError {
        PluginInvokeError::InvokeRejected(ErrorResponse {
            code: Some(code.to_string()),
            message: Some("rejected by store".to_string()),
            data: (),
        })
    }

    #[test]
    fn billing_rejections_become_purchase_errors() {
        let err = into_error(rejected("userCancelled"));
        assert!(matches!(
            err,
            crate::Error::Purchase { kind: PurchaseErrorKind::UserCancelled, .. }
        ));
    }

    #[test]
    fn other_rejections_stay_plugin_errors() {
        let err = into_error(rejected("bridgeUnavailable"));
        assert!(matches!(err, crate::Error::PluginInvoke(_)));
    }
}
