//! Loan recording endpoint

use axum::{extract::State, Json};

use crate::routes::{ApiError, AppState};
use crate::services::recorders::loan::{self, LoanReceipt, LoanRequest};

/// Handler for POST /api/loans
pub async fn record_loan(
    State(state): State<AppState>,
    Json(request): Json<LoanRequest>,
) -> Result<Json<LoanReceipt>, ApiError> {
    let receipt = loan::record_loan(state.store.as_ref(), request).await?;
    Ok(Json(receipt))
}
