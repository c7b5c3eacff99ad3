//! Read-only reporting endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;

use crate::routes::{ApiError, AppState};
use crate::services::cost_rollup::{self, OrderCosts, OrderItem};
use crate::services::reporting::{
    self, InventoryValuation, JobProfitability, ProfitAndLoss,
};

/// Handler for GET /api/reports/profit-and-loss
pub async fn profit_and_loss(
    State(state): State<AppState>,
) -> Result<Json<ProfitAndLoss>, ApiError> {
    let report = reporting::profit_and_loss(state.store.as_ref()).await?;
    Ok(Json(report))
}

/// Handler for GET /api/reports/inventory-valuation
pub async fn inventory_valuation(
    State(state): State<AppState>,
) -> Result<Json<InventoryValuation>, ApiError> {
    let report = reporting::inventory_valuation(state.store.as_ref()).await?;
    Ok(Json(report))
}

/// Handler for GET /api/reports/job-profitability/{id}
pub async fn job_profitability(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<JobProfitability>, ApiError> {
    let report = reporting::job_profitability(state.store.as_ref(), &id).await?;
    Ok(Json(report))
}

#[derive(Debug, Deserialize)]
pub struct OrderCostsRequest {
    pub items: Vec<OrderItem>,
}

/// Handler for POST /api/reports/order-costs
pub async fn order_costs(
    State(state): State<AppState>,
    Json(request): Json<OrderCostsRequest>,
) -> Result<Json<OrderCosts>, ApiError> {
    let costs =
        cost_rollup::calculate_order_costs_from_designs(state.store.as_ref(), &request.items)
            .await?;
    Ok(Json(costs))
}
