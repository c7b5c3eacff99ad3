//! HTTP surface
//!
//! Thin axum handlers over the ledger services. Error mapping is uniform:
//! validation and imbalance failures are 400, missing documents are 404,
//! store failures are logged in detail and surfaced as a generic 500.

pub mod accounts;
pub mod billing;
pub mod cron;
pub mod inventory;
pub mod journal;
pub mod loans;
pub mod reports;
pub mod work_orders;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;

use crate::config::Config;
use crate::error::LedgerError;
use crate::health::health;
use crate::store::DocumentStore;

/// Shared state for all route handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub cron_secret: String,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, config: &Config) -> Self {
        Self {
            store,
            cron_secret: config.cron_secret.clone(),
        }
    }
}

/// JSON error body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Error wrapper for proper HTTP status mapping
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn unauthorized() -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: "Unauthorized".to_string(),
        }
    }
}

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        match &err {
            LedgerError::Validation(_) | LedgerError::Imbalance { .. } => Self {
                status: StatusCode::BAD_REQUEST,
                message: err.to_string(),
            },
            LedgerError::NotFound { .. } => Self {
                status: StatusCode::NOT_FOUND,
                message: err.to_string(),
            },
            LedgerError::Store(store_err) => {
                tracing::error!(error = %store_err, "Document store failure");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: "Internal error".to_string(),
                }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.message,
        });
        (self.status, body).into_response()
    }
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/loans", post(loans::record_loan))
        .route("/api/accounts", get(accounts::list_accounts))
        .route("/api/accounts/{code}", get(accounts::get_account))
        .route(
            "/api/accounts/{code}/override",
            post(accounts::override_balance),
        )
        .route(
            "/api/accounts/{code}/reconcile",
            post(accounts::reconcile_account),
        )
        .route("/api/journal", get(journal::list_entries))
        .route("/api/inventory", get(inventory::list_items))
        .route("/api/inventory/purchases", post(inventory::record_purchase))
        .route(
            "/api/inventory/adjustments",
            post(inventory::adjust_inventory),
        )
        .route("/api/work-orders", post(work_orders::create_work_order))
        .route("/api/work-orders/{id}", get(work_orders::get_work_order))
        .route(
            "/api/work-orders/{id}/issue-materials",
            post(work_orders::issue_materials),
        )
        .route(
            "/api/work-orders/{id}/complete",
            post(work_orders::complete_work_order),
        )
        .route("/api/invoices", post(billing::record_invoice))
        .route("/api/payments", post(billing::record_payment))
        .route(
            "/api/reports/profit-and-loss",
            get(reports::profit_and_loss),
        )
        .route(
            "/api/reports/inventory-valuation",
            get(reports::inventory_valuation),
        )
        .route(
            "/api/reports/job-profitability/{id}",
            get(reports::job_profitability),
        )
        .route("/api/reports/order-costs", post(reports::order_costs))
        .route("/api/cron/sync-balances", post(cron::sync_balances))
        .route("/api/cron/fix-design-costs", post(cron::fix_design_costs))
        .with_state(state)
}
