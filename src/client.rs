use async_trait::async_trait;

use crate::models::*;
use crate::Result;

/// The platform billing client the adapter delegates to.
///
/// Implementations own every store interaction; [`crate::Iap`] only sequences
/// the calls, connecting before and disconnecting after each operation.
#[async_trait]
pub trait BillingClient: Send + Sync {
    fn is_supported(&self) -> bool;

    /// Returns `false` when the store cannot be reached.
    async fn connect(&self) -> Result<bool>;

    async fn disconnect(&self) -> Result<()>;

    async fn get_product_info(
        &self,
        item_type: ItemType,
        product_ids: &[String],
    ) -> Result<Vec<Product>>;

    async fn get_purchases(&self, item_type: ItemType) -> Result<Vec<Purchase>>;

    /// `None` when the store finished without producing a purchase.
    async fn purchase(&self, product_id: &str, item_type: ItemType) -> Result<Option<Purchase>>;

    async fn acknowledge_purchase(&self, purchase_token: &str) -> Result<bool>;
}
