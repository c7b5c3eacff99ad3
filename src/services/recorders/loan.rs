//! Loan receipt recorder: debit CASH, credit a liability account

use serde::{Deserialize, Serialize};

use crate::coa;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{AccountType, JournalLine};
use crate::services::journal_service::NewJournalEntry;
use crate::services::recorders::{post_and_reconcile, Posting};
use crate::store::DocumentStore;

#[derive(Debug, Clone, Deserialize)]
pub struct LoanRequest {
    pub amount_minor: i64,
    pub description: Option<String>,
    /// Liability account to credit; defaults to SHORT_TERM_DEBT
    pub liability_account: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoanReceipt {
    pub posting: Posting,
    pub liability_account: String,
    pub warnings: Vec<String>,
}

/// Compose the balanced loan entry (pure)
pub fn loan_entry(amount_minor: i64, liability_code: &str, description: &str) -> NewJournalEntry {
    NewJournalEntry::new(
        vec![
            JournalLine::debit(coa::CASH, amount_minor, description),
            JournalLine::credit(liability_code, amount_minor, description),
        ],
        None,
    )
}

/// Record a loan received: debit CASH, credit the liability account
pub async fn record_loan(
    store: &dyn DocumentStore,
    request: LoanRequest,
) -> LedgerResult<LoanReceipt> {
    if request.amount_minor <= 0 {
        return Err(LedgerError::validation(format!(
            "loan amount must be positive, got {}",
            request.amount_minor
        )));
    }

    let liability_code = request
        .liability_account
        .unwrap_or_else(|| coa::SHORT_TERM_DEBT.to_string());

    let liability = store
        .get_account(&liability_code)
        .await?
        .ok_or_else(|| LedgerError::not_found("account", liability_code.clone()))?;
    if liability.account_type != AccountType::Liability {
        return Err(LedgerError::validation(format!(
            "loan must credit a liability account, '{liability_code}' is {:?}",
            liability.account_type
        )));
    }

    let description = request
        .description
        .unwrap_or_else(|| "Loan received".to_string());

    let (posting, warnings) =
        post_and_reconcile(store, loan_entry(request.amount_minor, &liability_code, &description))
            .await?;

    Ok(LoanReceipt {
        posting,
        liability_account: liability_code,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loan_entry_is_balanced() {
        let entry = loan_entry(40_000_00, coa::SHORT_TERM_DEBT, "Working capital loan");
        assert_eq!(entry.lines.len(), 2);
        assert_eq!(entry.lines[0].account_code, coa::CASH);
        assert_eq!(entry.lines[0].debit_minor, 40_000_00);
        assert_eq!(entry.lines[1].account_code, coa::SHORT_TERM_DEBT);
        assert_eq!(entry.lines[1].credit_minor, 40_000_00);
    }
}
