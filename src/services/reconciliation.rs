//! Balance reconciliation engine
//!
//! Derives the authoritative balance of an account and writes it back into the
//! ledger store. Two strategies coexist, selected by the account's
//! [`ReconciliationPolicy`]:
//!
//! - **ReplayFromJournal**: scan every journal entry and sum the lines that
//!   reference the account, applying the type-specific sign convention.
//! - **OverwriteFromInventory**: recompute directly from the inventory item
//!   collection (sum of quantity x unit cost for the matching item type). The
//!   journal is a historical record only for these accounts.
//!
//! Reconciliation is idempotent: with no intervening events, repeated calls
//! compute and write the same balance.

use chrono::Utc;
use serde::Serialize;

use crate::coa;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{
    Account, InventoryItem, ItemType, JournalEntry, NormalBalance, ReconciliationPolicy,
};
use crate::services::journal_service;
use crate::store::DocumentStore;

/// Pure replay computation for a single account
///
/// Asset/expense accounts: debits minus credits. Liability/equity/revenue
/// accounts: credits minus debits.
pub fn replayed_balance_minor(account: &Account, entries: &[JournalEntry]) -> i64 {
    let mut debits = 0i64;
    let mut credits = 0i64;
    for entry in entries {
        for line in &entry.lines {
            if line.account_code == account.code {
                debits += line.debit_minor;
                credits += line.credit_minor;
            }
        }
    }
    match account.account_type.normal_balance() {
        NormalBalance::Debit => debits - credits,
        NormalBalance::Credit => credits - debits,
    }
}

/// Pure inventory valuation for one item type
pub fn inventory_balance_minor(items: &[InventoryItem], item_type: ItemType) -> i64 {
    items
        .iter()
        .filter(|i| i.item_type == item_type)
        .map(|i| i.value_minor())
        .sum()
}

fn inventory_type_for(code: &str) -> Option<ItemType> {
    match code {
        coa::INVENTORY_RAW => Some(ItemType::Raw),
        coa::INVENTORY_WIP => Some(ItemType::Wip),
        coa::INVENTORY_FINISHED => Some(ItemType::Finished),
        _ => None,
    }
}

/// Recompute and persist one account's balance, returning the new value
pub async fn reconcile(store: &dyn DocumentStore, code: &str) -> LedgerResult<i64> {
    let account = store
        .get_account(code)
        .await?
        .ok_or_else(|| LedgerError::not_found("account", code))?;

    let balance_minor = match account.policy {
        ReconciliationPolicy::ReplayFromJournal => {
            let entries = journal_service::list_entries(store).await?;
            replayed_balance_minor(&account, &entries)
        }
        ReconciliationPolicy::OverwriteFromInventory => {
            let item_type = inventory_type_for(code).ok_or_else(|| {
                LedgerError::validation(format!(
                    "account '{code}' has inventory policy but no inventory type"
                ))
            })?;
            let items = store.list_inventory_items().await?;
            inventory_balance_minor(&items, item_type)
        }
    };

    store
        .set_account_balance(code, balance_minor, Utc::now())
        .await?;

    tracing::debug!(
        account_code = %code,
        balance_minor,
        policy = ?account.policy,
        "Reconciled account balance"
    );

    Ok(balance_minor)
}

/// Outcome of a multi-account reconciliation pass
#[derive(Debug, Default, Serialize)]
pub struct ReconcileSummary {
    pub updated: usize,
    pub failed: usize,
    pub errors: Vec<String>,
}

/// Reconcile a set of accounts, continuing past per-account failures
///
/// Account recomputations are independent; there is no ordering requirement.
/// Errors are accumulated into the summary rather than aborting the pass.
pub async fn reconcile_all<S: AsRef<str>>(
    store: &dyn DocumentStore,
    codes: &[S],
) -> LedgerResult<ReconcileSummary> {
    let mut summary = ReconcileSummary::default();
    for code in codes {
        let code = code.as_ref();
        match reconcile(store, code).await {
            Ok(_) => summary.updated += 1,
            Err(err) => {
                tracing::warn!(account_code = %code, error = %err, "Reconciliation failed");
                summary.failed += 1;
                summary.errors.push(format!("{code}: {err}"));
            }
        }
    }
    Ok(summary)
}
