use tauri::{AppHandle, command, Runtime};

use crate::models::*;
use crate::{BillingExt, Result};

#[command]
pub(crate) async fn get_available_products<R: Runtime>(
    app: AppHandle<R>,
    payload: GetProductsRequest,
) -> Result<GetProductsResponse> {
    let products = app
        .billing()
        .get_available_products(payload.item_type, &payload.product_ids)
        .await?;
    Ok(GetProductsResponse { products })
}

#[command]
pub(crate) async fn get_purchases<R: Runtime>(
    app: AppHandle<R>,
    payload: GetPurchasesRequest,
) -> Result<GetPurchasesResponse> {
    let purchases = app.billing().get_purchases(payload.item_type).await?;
    Ok(GetPurchasesResponse { purchases })
}

#[command]
pub(crate) async fn purchase_item<R: Runtime>(
    app: AppHandle<R>,
    payload: PurchaseItemRequest,
) -> Result<PurchaseItemResponse> {
    let purchase = app
        .billing()
        .purchase_item(payload.item_type, &payload.product_id, false)
        .await;
    Ok(PurchaseItemResponse { purchase })
}

#[command]
pub(crate) async fn restore_item<R: Runtime>(
    app: AppHandle<R>,
    payload: PurchaseItemRequest,
) -> Result<PurchaseItemResponse> {
    let purchase = app
        .billing()
        .purchase_item(payload.item_type, &payload.product_id, true)
        .await;
    Ok(PurchaseItemResponse { purchase })
}
