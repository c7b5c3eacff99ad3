//! Billing recorders: invoice issuance and payment receipt

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::coa;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Invoice, JournalLine, Payment};
use crate::services::journal_service::NewJournalEntry;
use crate::services::recorders::{post_and_reconcile, Posting};
use crate::store::DocumentStore;

#[derive(Debug, Clone, Deserialize)]
pub struct InvoiceRequest {
    pub order_id: Option<String>,
    pub work_order_id: Option<String>,
    pub customer_name: String,
    pub total_minor: i64,
}

#[derive(Debug, Serialize)]
pub struct InvoiceResult {
    pub posting: Posting,
    pub invoice: Invoice,
    pub warnings: Vec<String>,
}

/// Deterministic invoice number: order-id suffix when available, otherwise a
/// creation timestamp
pub fn invoice_number(order_id: Option<&str>, issued_at: chrono::DateTime<Utc>) -> String {
    match order_id {
        Some(order_id) => format!("INV-{order_id}"),
        None => format!("INV-{}", issued_at.timestamp_millis()),
    }
}

/// Issue an invoice: debit ACCOUNTS_RECEIVABLE, credit SALES_REVENUE
pub async fn record_invoice(
    store: &dyn DocumentStore,
    request: InvoiceRequest,
) -> LedgerResult<InvoiceResult> {
    if request.total_minor <= 0 {
        return Err(LedgerError::validation(format!(
            "invoice total must be positive, got {}",
            request.total_minor
        )));
    }
    if request.customer_name.is_empty() {
        return Err(LedgerError::validation("customer name is required"));
    }

    let issued_at = Utc::now();
    let number = invoice_number(request.order_id.as_deref(), issued_at);
    if store.get_invoice(&number).await?.is_some() {
        return Err(LedgerError::validation(format!(
            "invoice '{number}' already exists"
        )));
    }

    let invoice = Invoice {
        id: number.clone(),
        order_id: request.order_id,
        work_order_id: request.work_order_id,
        customer_name: request.customer_name,
        total_minor: request.total_minor,
        issued_at,
    };
    store.put_invoice(invoice.clone()).await?;

    let description = format!("Invoice {number} issued to {}", invoice.customer_name);
    let (posting, warnings) = post_and_reconcile(
        store,
        NewJournalEntry::new(
            vec![
                JournalLine::debit(coa::ACCOUNTS_RECEIVABLE, invoice.total_minor, &description),
                JournalLine::credit(coa::SALES_REVENUE, invoice.total_minor, &description),
            ],
            Some(number),
        ),
    )
    .await?;

    Ok(InvoiceResult {
        posting,
        invoice,
        warnings,
    })
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentRequest {
    pub invoice_id: Option<String>,
    pub amount_minor: i64,
    pub method: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PaymentResult {
    pub posting: Posting,
    pub payment: Payment,
    pub warnings: Vec<String>,
}

/// Record a payment receipt: debit CASH, credit ACCOUNTS_RECEIVABLE
pub async fn record_payment(
    store: &dyn DocumentStore,
    request: PaymentRequest,
) -> LedgerResult<PaymentResult> {
    if request.amount_minor <= 0 {
        return Err(LedgerError::validation(format!(
            "payment amount must be positive, got {}",
            request.amount_minor
        )));
    }
    if let Some(invoice_id) = &request.invoice_id {
        if store.get_invoice(invoice_id).await?.is_none() {
            return Err(LedgerError::not_found("invoice", invoice_id.clone()));
        }
    }

    let payment = Payment {
        id: Uuid::new_v4(),
        invoice_id: request.invoice_id,
        amount_minor: request.amount_minor,
        method: request.method,
        received_at: Utc::now(),
    };
    store.put_payment(payment.clone()).await?;

    let description = match &payment.invoice_id {
        Some(invoice_id) => format!("Payment received for {invoice_id}"),
        None => "Payment received".to_string(),
    };
    let (posting, warnings) = post_and_reconcile(
        store,
        NewJournalEntry::new(
            vec![
                JournalLine::debit(coa::CASH, payment.amount_minor, &description),
                JournalLine::credit(coa::ACCOUNTS_RECEIVABLE, payment.amount_minor, &description),
            ],
            payment.invoice_id.clone(),
        ),
    )
    .await?;

    Ok(PaymentResult {
        posting,
        payment,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invoice_number_prefers_order_id() {
        let now = Utc::now();
        assert_eq!(invoice_number(Some("SO-1001"), now), "INV-SO-1001");
    }

    #[test]
    fn invoice_number_falls_back_to_timestamp() {
        let now = Utc::now();
        let number = invoice_number(None, now);
        assert_eq!(number, format!("INV-{}", now.timestamp_millis()));
    }
}
