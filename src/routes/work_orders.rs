//! Work order endpoints: create, issue materials, complete

use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::LedgerError;
use crate::models::WorkOrder;
use crate::routes::{ApiError, AppState};
use crate::services::recorders::work_orders::{
    self, CompleteWorkOrderRequest, CompletionResult, CreateWorkOrderRequest,
    CreateWorkOrderResult, IssueMaterialsRequest, IssueMaterialsResult,
};

/// Handler for POST /api/work-orders
pub async fn create_work_order(
    State(state): State<AppState>,
    Json(request): Json<CreateWorkOrderRequest>,
) -> Result<Json<CreateWorkOrderResult>, ApiError> {
    let result = work_orders::create_work_order(state.store.as_ref(), request).await?;
    Ok(Json(result))
}

/// Handler for GET /api/work-orders/{id}
pub async fn get_work_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<WorkOrder>, ApiError> {
    let work_order = state
        .store
        .get_work_order(&id)
        .await
        .map_err(LedgerError::from)?
        .ok_or_else(|| LedgerError::not_found("work order", id))?;
    Ok(Json(work_order))
}

/// Handler for POST /api/work-orders/{id}/issue-materials
pub async fn issue_materials(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<IssueMaterialsRequest>,
) -> Result<Json<IssueMaterialsResult>, ApiError> {
    let result = work_orders::issue_materials(state.store.as_ref(), &id, request).await?;
    Ok(Json(result))
}

/// Handler for POST /api/work-orders/{id}/complete
pub async fn complete_work_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<CompleteWorkOrderRequest>,
) -> Result<Json<CompletionResult>, ApiError> {
    let result = work_orders::complete_work_order(state.store.as_ref(), &id, request).await?;
    Ok(Json(result))
}
