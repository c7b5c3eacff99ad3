//! Account endpoints: chart listing, single account, override, reconcile

use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::LedgerError;
use crate::models::Account;
use crate::routes::{ApiError, AppState};
use crate::services::recorders::r#override::{self, OverrideRequest, OverrideResult};
use crate::services::reconciliation;
use serde::Serialize;

/// Handler for GET /api/accounts
pub async fn list_accounts(
    State(state): State<AppState>,
) -> Result<Json<Vec<Account>>, ApiError> {
    let accounts = state
        .store
        .list_accounts()
        .await
        .map_err(LedgerError::from)?;
    Ok(Json(accounts))
}

/// Handler for GET /api/accounts/{code}
pub async fn get_account(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<Account>, ApiError> {
    let account = state
        .store
        .get_account(&code)
        .await
        .map_err(LedgerError::from)?
        .ok_or_else(|| LedgerError::not_found("account", code))?;
    Ok(Json(account))
}

/// Handler for POST /api/accounts/{code}/override
pub async fn override_balance(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Json(request): Json<OverrideRequest>,
) -> Result<Json<OverrideResult>, ApiError> {
    let result = r#override::override_balance(state.store.as_ref(), &code, request).await?;
    Ok(Json(result))
}

#[derive(Debug, Serialize)]
pub struct ReconcileResponse {
    pub account_code: String,
    pub balance_minor: i64,
}

/// Handler for POST /api/accounts/{code}/reconcile
pub async fn reconcile_account(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<ReconcileResponse>, ApiError> {
    let balance_minor = reconciliation::reconcile(state.store.as_ref(), &code).await?;
    Ok(Json(ReconcileResponse {
        account_code: code,
        balance_minor,
    }))
}
