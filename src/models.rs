use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum ItemType {
    #[default]
    #[serde(rename = "inapp")]
    InAppPurchase,
    #[serde(rename = "subs")]
    Subscription,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PurchaseState {
    Purchased,
    Canceled,
    Purchasing,
    Failed,
    Restored,
    Deferred,
    FreeTrial,
    PaymentPending,
    #[default]
    #[serde(other)]
    Unknown,
}

impl PurchaseState {
    /// Whether a purchase in this state grants the item.
    pub fn is_owned(self) -> bool {
        matches!(self, PurchaseState::Purchased | PurchaseState::Restored)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PurchaseErrorKind {
    UserCancelled,
    BillingUnavailable,
    ItemUnavailable,
    AlreadyOwned,
    NotOwned,
    ServiceUnavailable,
    PaymentInvalid,
    PaymentNotAllowed,
    DeveloperError,
    GeneralError,
}

impl PurchaseErrorKind {
    /// Parses the error code a native billing plugin rejects with.
    pub fn from_code(code: &str) -> Option<Self> {
        serde_json::from_value(serde_json::Value::String(code.to_string())).ok()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub product_id: String,
    pub name: String,
    pub description: String,
    pub localized_price: String,
    pub currency_code: String,
    pub micros_price: i64,
    #[serde(default)]
    pub item_type: ItemType,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Purchase {
    pub id: Option<String>,
    pub product_id: String,
    pub purchase_token: String,
    #[serde(default)]
    pub state: PurchaseState,
    pub transaction_date: i64,
    #[serde(default)]
    pub auto_renewing: bool,
    #[serde(default)]
    pub is_acknowledged: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetProductsRequest {
    pub product_ids: Vec<String>,
    #[serde(default)]
    pub item_type: ItemType,
}

/// `products` is absent when billing is unavailable or the store could not be reached.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetProductsResponse {
    pub products: Option<Vec<Product>>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetPurchasesRequest {
    #[serde(default)]
    pub item_type: ItemType,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetPurchasesResponse {
    pub purchases: Option<Vec<Purchase>>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseItemRequest {
    pub product_id: String,
    #[serde(default)]
    pub item_type: ItemType,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseItemResponse {
    pub purchase: Option<Purchase>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn item_type_uses_store_names() {
        assert_eq!(serde_json::to_value(ItemType::InAppPurchase).unwrap(), json!("inapp"));
        assert_eq!(serde_json::to_value(ItemType::Subscription).unwrap(), json!("subs"));
    }

    #[test]
    fn products_request_defaults_to_in_app() {
        let req: GetProductsRequest =
            serde_json::from_value(json!({ "productIds": ["coins_100"] })).unwrap();
        assert_eq!(req.item_type, ItemType::InAppPurchase);
        assert_eq!(req.product_ids, vec!["coins_100".to_string()]);
    }

    #[test]
    fn unrecognized_state_is_unknown() {
        let purchase: Purchase = serde_json::from_value(json!({
            "id": "GPA.1234",
            "productId": "pro",
            "purchaseToken": "tok",
            "state": "somethingNew",
            "transactionDate": 1_700_000_000_000_i64,
        }))
        .unwrap();
        assert_eq!(purchase.state, PurchaseState::Unknown);
        assert!(!purchase.auto_renewing);
        assert!(purchase.payload.is_none());
    }

    #[test]
    fn error_codes_map_to_kinds() {
        assert_eq!(
            PurchaseErrorKind::from_code("userCancelled"),
            Some(PurchaseErrorKind::UserCancelled)
        );
        assert_eq!(
            PurchaseErrorKind::from_code("alreadyOwned"),
            Some(PurchaseErrorKind::AlreadyOwned)
        );
        assert_eq!(PurchaseErrorKind::from_code("UserCancelled"), None);
        assert_eq!(PurchaseErrorKind::from_code("timeout"), None);
    }

    #[test]
    fn only_purchased_and_restored_are_owned() {
        assert!(PurchaseState::Purchased.is_owned());
        assert!(PurchaseState::Restored.is_owned());
        assert!(!PurchaseState::PaymentPending.is_owned());
        assert!(!PurchaseState::Deferred.is_owned());
        assert!(!PurchaseState::Canceled.is_owned());
    }
}
