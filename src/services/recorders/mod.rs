//! Transaction recorders
//!
//! One recorder per business event type. Each recorder validates its input,
//! composes exactly one balanced journal entry, appends it, then reconciles
//! every account the entry touched. The append and the reconciliation are
//! independent writes; a reconciliation failure after a successful append is
//! reported as a warning on the outcome, not rolled back.

pub mod billing;
pub mod inventory;
pub mod loan;
pub mod r#override;
pub mod work_orders;

use serde::Serialize;
use uuid::Uuid;

use crate::error::LedgerResult;
use crate::services::journal_service::{self, NewJournalEntry};
use crate::services::reconciliation;
use crate::store::DocumentStore;

/// The journal side of a recorder outcome
#[derive(Debug, Clone, Serialize)]
pub struct Posting {
    pub journal_entry_id: Uuid,
    /// Total entry amount (sum of debits) in minor units
    pub amount_minor: i64,
}

/// Append a balanced entry, then reconcile every account it references
///
/// Reconciliation failures are collected as warnings; the entry itself is
/// already durable at that point and stays in the log.
pub(crate) async fn post_and_reconcile(
    store: &dyn DocumentStore,
    candidate: NewJournalEntry,
) -> LedgerResult<(Posting, Vec<String>)> {
    let entry = journal_service::append_entry(store, candidate).await?;

    let mut codes: Vec<String> = entry
        .lines
        .iter()
        .map(|l| l.account_code.clone())
        .collect();
    codes.sort();
    codes.dedup();

    let mut warnings = Vec::new();
    for code in &codes {
        if let Err(err) = reconciliation::reconcile(store, code).await {
            tracing::warn!(
                entry_id = %entry.id,
                account_code = %code,
                error = %err,
                "Balance sync failed after journal append"
            );
            warnings.push(format!("balance sync failed for {code}: {err}"));
        }
    }

    Ok((
        Posting {
            journal_entry_id: entry.id,
            amount_minor: entry.total_debits_minor(),
        },
        warnings,
    ))
}
