//! Manual balance override recorder
//!
//! Corrections to an account balance always go through an audited adjusting
//! journal entry against the BALANCE_ADJUSTMENT equity account. For
//! replay-tracked accounts the stored balance is then re-derived from the
//! journal, so it can never silently diverge from journal truth; for
//! inventory-tracked accounts the entry is booked as history but the balance
//! stays inventory-derived.

use serde::{Deserialize, Serialize};

use crate::coa;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{JournalLine, NormalBalance, ReconciliationPolicy};
use crate::services::journal_service::NewJournalEntry;
use crate::services::recorders::{post_and_reconcile, Posting};
use crate::services::reconciliation;
use crate::store::DocumentStore;

#[derive(Debug, Clone, Deserialize)]
pub struct OverrideRequest {
    pub target_minor: i64,
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct OverrideResult {
    /// None when the account was already at the target balance
    pub posting: Option<Posting>,
    pub previous_minor: i64,
    pub new_minor: i64,
    /// The target cannot be forced onto inventory-derived accounts; the
    /// adjusting entry is still booked for audit
    pub policy: ReconciliationPolicy,
    pub warnings: Vec<String>,
}

/// Set an account balance to a target value via an adjusting entry
pub async fn override_balance(
    store: &dyn DocumentStore,
    account_code: &str,
    request: OverrideRequest,
) -> LedgerResult<OverrideResult> {
    let account = store
        .get_account(account_code)
        .await?
        .ok_or_else(|| LedgerError::not_found("account", account_code))?;

    if account_code == coa::BALANCE_ADJUSTMENT {
        return Err(LedgerError::validation(
            "cannot override the balance adjustment account against itself",
        ));
    }

    // Re-derive before diffing; the stored balance may be stale.
    let previous_minor = reconciliation::reconcile(store, account_code).await?;
    let diff = request.target_minor - previous_minor;

    if diff == 0 {
        return Ok(OverrideResult {
            posting: None,
            previous_minor,
            new_minor: previous_minor,
            policy: account.policy,
            warnings: Vec::new(),
        });
    }

    let description = request
        .description
        .unwrap_or_else(|| format!("Manual balance override for {account_code}"));

    // A positive diff moves the account toward its normal side.
    let lines = match (account.account_type.normal_balance(), diff > 0) {
        (NormalBalance::Debit, true) | (NormalBalance::Credit, false) => vec![
            JournalLine::debit(account_code, diff.abs(), &description),
            JournalLine::credit(coa::BALANCE_ADJUSTMENT, diff.abs(), &description),
        ],
        (NormalBalance::Debit, false) | (NormalBalance::Credit, true) => vec![
            JournalLine::debit(coa::BALANCE_ADJUSTMENT, diff.abs(), &description),
            JournalLine::credit(account_code, diff.abs(), &description),
        ],
    };

    let (posting, warnings) = post_and_reconcile(
        store,
        NewJournalEntry::new(lines, Some(format!("override:{account_code}"))),
    )
    .await?;

    let new_minor = store
        .get_account(account_code)
        .await?
        .map(|a| a.balance_minor)
        .unwrap_or(previous_minor);

    tracing::info!(
        account_code,
        previous_minor,
        new_minor,
        "Balance override recorded"
    );

    Ok(OverrideResult {
        posting: Some(posting),
        previous_minor,
        new_minor,
        policy: account.policy,
        warnings,
    })
}
