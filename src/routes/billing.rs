//! Billing endpoints: invoices and payments

use axum::{extract::State, Json};

use crate::routes::{ApiError, AppState};
use crate::services::recorders::billing::{
    self, InvoiceRequest, InvoiceResult, PaymentRequest, PaymentResult,
};

/// Handler for POST /api/invoices
pub async fn record_invoice(
    State(state): State<AppState>,
    Json(request): Json<InvoiceRequest>,
) -> Result<Json<InvoiceResult>, ApiError> {
    let result = billing::record_invoice(state.store.as_ref(), request).await?;
    Ok(Json(result))
}

/// Handler for POST /api/payments
pub async fn record_payment(
    State(state): State<AppState>,
    Json(request): Json<PaymentRequest>,
) -> Result<Json<PaymentResult>, ApiError> {
    let result = billing::record_payment(state.store.as_ref(), request).await?;
    Ok(Json(result))
}
