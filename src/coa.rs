//! Chart of accounts seed
//!
//! The chart is a fixed set of 19 accounts created once at startup. Accounts
//! are never deleted; their balances are mutated only by the reconciliation
//! engine.

use chrono::Utc;

use crate::error::LedgerResult;
use crate::models::{Account, AccountType, ReconciliationPolicy};
use crate::store::DocumentStore;

/// Account codes referenced directly by transaction recorders
pub const CASH: &str = "CASH";
pub const ACCOUNTS_RECEIVABLE: &str = "ACCOUNTS_RECEIVABLE";
pub const INVENTORY_RAW: &str = "INVENTORY_RAW";
pub const INVENTORY_WIP: &str = "INVENTORY_WIP";
pub const INVENTORY_FINISHED: &str = "INVENTORY_FINISHED";
pub const SHORT_TERM_DEBT: &str = "SHORT_TERM_DEBT";
pub const SALES_REVENUE: &str = "SALES_REVENUE";
pub const INVENTORY_ADJUSTMENT: &str = "INVENTORY_ADJUSTMENT";
pub const BALANCE_ADJUSTMENT: &str = "BALANCE_ADJUSTMENT";

/// The full seed chart: (code, display name, type)
const SEED: &[(&str, &str, AccountType)] = &[
    (CASH, "Cash", AccountType::Asset),
    (ACCOUNTS_RECEIVABLE, "Accounts Receivable", AccountType::Asset),
    (INVENTORY_RAW, "Inventory - Raw Materials", AccountType::Asset),
    (INVENTORY_WIP, "Inventory - Work in Progress", AccountType::Asset),
    (INVENTORY_FINISHED, "Inventory - Finished Goods", AccountType::Asset),
    ("PREPAID_EXPENSES", "Prepaid Expenses", AccountType::Asset),
    ("EQUIPMENT", "Equipment", AccountType::Asset),
    ("ACCOUNTS_PAYABLE", "Accounts Payable", AccountType::Liability),
    (SHORT_TERM_DEBT, "Short-Term Debt", AccountType::Liability),
    ("LONG_TERM_DEBT", "Long-Term Debt", AccountType::Liability),
    ("OWNER_EQUITY", "Owner's Equity", AccountType::Equity),
    ("RETAINED_EARNINGS", "Retained Earnings", AccountType::Equity),
    (BALANCE_ADJUSTMENT, "Manual Balance Adjustments", AccountType::Equity),
    (SALES_REVENUE, "Sales Revenue", AccountType::Revenue),
    ("OTHER_INCOME", "Other Income", AccountType::Revenue),
    ("COGS", "Cost of Goods Sold", AccountType::Expense),
    (INVENTORY_ADJUSTMENT, "Inventory Adjustments", AccountType::Expense),
    ("LABOR_EXPENSE", "Labor Expense", AccountType::Expense),
    ("OVERHEAD_EXPENSE", "Overhead Expense", AccountType::Expense),
];

/// Reconciliation policy for a given account code
///
/// The three inventory accounts are overwritten from the inventory item
/// collection; every other account replays the journal log.
pub fn policy_for(code: &str) -> ReconciliationPolicy {
    match code {
        INVENTORY_RAW | INVENTORY_WIP | INVENTORY_FINISHED => {
            ReconciliationPolicy::OverwriteFromInventory
        }
        _ => ReconciliationPolicy::ReplayFromJournal,
    }
}

/// Create any missing seed accounts with a zero balance
///
/// Existing accounts (and their balances) are left untouched, so the seed is
/// safe to run on every startup. Returns the number of accounts created.
pub async fn seed_chart(store: &dyn DocumentStore) -> LedgerResult<usize> {
    let mut created = 0;
    for (code, name, account_type) in SEED {
        if store.get_account(code).await?.is_none() {
            store
                .put_account(Account {
                    code: code.to_string(),
                    name: name.to_string(),
                    account_type: *account_type,
                    policy: policy_for(code),
                    balance_minor: 0,
                    updated_at: Utc::now(),
                })
                .await?;
            created += 1;
        }
    }
    if created > 0 {
        tracing::info!(created, "Seeded chart of accounts");
    }
    Ok(created)
}
