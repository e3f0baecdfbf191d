use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use crate::client::BillingClient;
use crate::config::Config;
use crate::models::*;
use crate::{Error, Result};

type PurchaseListener = Arc<dyn Fn(&Purchase) + Send + Sync>;

/// Access to the billing APIs.
///
/// Every operation opens a connection on the client and closes it again
/// before returning, whatever the outcome.
pub struct Iap {
    client: Arc<dyn BillingClient>,
    acknowledge_purchases: bool,
    purchasing: AtomicBool,
    listeners: RwLock<Vec<PurchaseListener>>,
}

/// Clears the in-progress flag when the purchase flow exits.
struct PurchasingGuard<'a>(&'a AtomicBool);

impl Drop for PurchasingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Iap {
    pub fn new(client: Arc<dyn BillingClient>) -> Self {
        Self::with_config(client, &Config::default())
    }

    pub fn with_config(client: Arc<dyn BillingClient>, config: &Config) -> Self {
        Self {
            client,
            acknowledge_purchases: config.acknowledge_purchases,
            purchasing: AtomicBool::new(false),
            listeners: RwLock::new(Vec::new()),
        }
    }

    /// Registers a listener for newly completed purchases. Restored purchases
    /// are not reported.
    pub fn on_purchase<F>(&self, listener: F)
    where
        F: Fn(&Purchase) + Send + Sync + 'static,
    {
        self.listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::new(listener));
    }

    pub fn is_purchasing(&self) -> bool {
        self.purchasing.load(Ordering::Acquire)
    }

    /// `Ok(None)` when billing is unsupported or the store is unreachable.
    pub async fn get_available_products(
        &self,
        item_type: ItemType,
        product_ids: &[String],
    ) -> Result<Option<Vec<Product>>> {
        if !self.client.is_supported() {
            return Ok(None);
        }
        self.connected(|| self.client.get_product_info(item_type, product_ids))
            .await
    }

    /// `Ok(None)` when billing is unsupported or the store is unreachable.
    pub async fn get_purchases(&self, item_type: ItemType) -> Result<Option<Vec<Purchase>>> {
        if !self.client.is_supported() {
            return Ok(None);
        }
        self.connected(|| self.client.get_purchases(item_type)).await
    }

    /// Returns the owned purchase for `product_id`, buying it first unless
    /// `restore_only` is set.
    ///
    /// Failures are logged and reported as `None`, as is a call made while
    /// another purchase is still running.
    ///
    /// Dropping the returned future early releases the in-progress flag but
    /// skips the disconnect; the next operation connects afresh.
    pub async fn purchase_item(
        &self,
        item_type: ItemType,
        product_id: &str,
        restore_only: bool,
    ) -> Option<Purchase> {
        let Some(_guard) = self.begin_purchase() else {
            tracing::debug!(product_id, "purchase already in progress");
            return None;
        };
        if !self.client.is_supported() {
            tracing::debug!(product_id, "billing not supported");
            return None;
        }

        let outcome = self.run_purchase(item_type, product_id, restore_only).await;
        self.disconnect().await;

        match outcome {
            Ok(Some(purchase)) => return Some(purchase),
            Ok(None) => {}
            Err(Error::Purchase { kind, message }) => {
                tracing::error!(product_id, ?kind, %message, "purchase error");
            }
            Err(err) => {
                tracing::warn!(product_id, error = %err, "issue connecting to billing");
            }
        }
        tracing::debug!(product_id, restore_only, "purchase_item: false");
        None
    }

    fn begin_purchase(&self) -> Option<PurchasingGuard<'_>> {
        self.purchasing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| PurchasingGuard(&self.purchasing))
    }

    async fn run_purchase(
        &self,
        item_type: ItemType,
        product_id: &str,
        restore_only: bool,
    ) -> Result<Option<Purchase>> {
        if !self.client.connect().await? {
            tracing::debug!(product_id, "purchase_item: not connected");
            return Ok(None);
        }

        match self.client.get_purchases(item_type).await {
            Ok(existing) => {
                let owned = existing
                    .into_iter()
                    .find(|p| p.product_id == product_id)
                    .filter(|p| p.state.is_owned());
                if let Some(purchase) = owned {
                    tracing::debug!(product_id, state = ?purchase.state, "restored existing purchase");
                    return Ok(Some(purchase));
                }
            }
            Err(err) => {
                tracing::warn!(product_id, error = %err, "failed to list existing purchases");
            }
        }

        if restore_only {
            return Ok(None);
        }

        let Some(purchase) = self.client.purchase(product_id, item_type).await? else {
            tracing::debug!(product_id, "purchase_item: did not purchase");
            return Ok(None);
        };
        if purchase.state != PurchaseState::Purchased {
            tracing::debug!(product_id, state = ?purchase.state, "purchase not completed");
            return Ok(None);
        }
        if self.acknowledge_purchases
            && !self
                .client
                .acknowledge_purchase(&purchase.purchase_token)
                .await?
        {
            tracing::warn!(product_id, "purchased but not acknowledged");
            return Ok(None);
        }

        self.notify(&purchase);
        tracing::debug!(product_id, "purchase_item: true");
        Ok(Some(purchase))
    }

    async fn connected<T, F, Fut>(&self, op: F) -> Result<Option<T>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let result = match self.client.connect().await {
            Ok(true) => op().await.map(Some),
            Ok(false) => {
                tracing::debug!("billing not connected");
                Ok(None)
            }
            Err(err) => Err(err),
        };
        self.disconnect().await;
        result
    }

    async fn disconnect(&self) {
        if let Err(err) = self.client.disconnect().await {
            tracing::warn!(error = %err, "failed to disconnect billing client");
        }
    }

    fn notify(&self, purchase: &Purchase) {
        let listeners = self
            .listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        for listener in listeners {
            listener(purchase);
        }
    }
}
