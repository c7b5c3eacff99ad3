//! Inventory endpoints: listing, purchases, adjustments

use axum::{extract::State, Json};

use crate::error::LedgerError;
use crate::models::InventoryItem;
use crate::routes::{ApiError, AppState};
use crate::services::recorders::inventory::{
    self, AdjustmentRequest, AdjustmentResult, PurchaseRequest, PurchaseResult,
};

/// Handler for GET /api/inventory
pub async fn list_items(
    State(state): State<AppState>,
) -> Result<Json<Vec<InventoryItem>>, ApiError> {
    let items = state
        .store
        .list_inventory_items()
        .await
        .map_err(LedgerError::from)?;
    Ok(Json(items))
}

/// Handler for POST /api/inventory/purchases
pub async fn record_purchase(
    State(state): State<AppState>,
    Json(request): Json<PurchaseRequest>,
) -> Result<Json<PurchaseResult>, ApiError> {
    let result = inventory::record_purchase(state.store.as_ref(), request).await?;
    Ok(Json(result))
}

/// Handler for POST /api/inventory/adjustments
pub async fn adjust_inventory(
    State(state): State<AppState>,
    Json(request): Json<AdjustmentRequest>,
) -> Result<Json<AdjustmentResult>, ApiError> {
    let result = inventory::adjust_inventory(state.store.as_ref(), request).await?;
    Ok(Json(result))
}
