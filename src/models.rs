//! Document models persisted in the store
//!
//! Every struct here maps one-to-one onto a document in a store collection:
//! accounts, journal_entries, inventory_items, inventory_movements,
//! work_orders, designs, invoices, payments.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account classification in the chart of accounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    Asset,
    Liability,
    Equity,
    Revenue,
    Expense,
}

/// Which side increases an account's balance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalBalance {
    Debit,
    Credit,
}

impl AccountType {
    /// Sign convention: assets and expenses grow on debit, the rest on credit.
    pub fn normal_balance(self) -> NormalBalance {
        match self {
            AccountType::Asset | AccountType::Expense => NormalBalance::Debit,
            AccountType::Liability | AccountType::Equity | AccountType::Revenue => {
                NormalBalance::Credit
            }
        }
    }
}

/// How an account's authoritative balance is recomputed
///
/// Most accounts replay the journal log. The inventory accounts are overwritten
/// from the inventory item collection instead, which is treated as the source
/// of truth for stock valuation; for those the journal is a historical record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReconciliationPolicy {
    ReplayFromJournal,
    OverwriteFromInventory,
}

/// Chart of accounts entry with its current materialized balance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Stable string key, e.g. "CASH" or "SHORT_TERM_DEBT"
    pub code: String,
    pub name: String,
    pub account_type: AccountType,
    pub policy: ReconciliationPolicy,
    /// Signed balance in minor units (cents), per the normal-balance convention
    pub balance_minor: i64,
    pub updated_at: DateTime<Utc>,
}

/// One debit or credit against a single account
///
/// The schema permits both sides nonzero but recorders only ever emit pure
/// debit or pure credit lines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalLine {
    pub account_code: String,
    pub debit_minor: i64,
    pub credit_minor: i64,
    pub description: String,
}

impl JournalLine {
    pub fn debit(account_code: &str, amount_minor: i64, description: &str) -> Self {
        Self {
            account_code: account_code.to_string(),
            debit_minor: amount_minor,
            credit_minor: 0,
            description: description.to_string(),
        }
    }

    pub fn credit(account_code: &str, amount_minor: i64, description: &str) -> Self {
        Self {
            account_code: account_code.to_string(),
            debit_minor: 0,
            credit_minor: amount_minor,
            description: description.to_string(),
        }
    }
}

/// Balanced, immutable record of a financial event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: Uuid,
    pub effective_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    /// Reference to the originating business document (order, work order,
    /// invoice, adjustment). Also carries idempotency tokens such as
    /// `wo:{id}:completed`.
    pub linked_doc: Option<String>,
    pub lines: Vec<JournalLine>,
}

impl JournalEntry {
    pub fn total_debits_minor(&self) -> i64 {
        self.lines.iter().map(|l| l.debit_minor).sum()
    }

    pub fn total_credits_minor(&self) -> i64 {
        self.lines.iter().map(|l| l.credit_minor).sum()
    }
}

/// Inventory item classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Raw,
    Wip,
    Finished,
}

/// Stock item; quantity on hand is never allowed below zero
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItem {
    /// SKU
    pub id: String,
    pub name: String,
    pub item_type: ItemType,
    pub quantity_on_hand: i64,
    pub unit_cost_minor: i64,
    pub updated_at: DateTime<Utc>,
}

impl InventoryItem {
    pub fn value_minor(&self) -> i64 {
        self.quantity_on_hand * self.unit_cost_minor
    }
}

/// Audit record of a stock change (signed quantity)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryMovement {
    pub id: Uuid,
    pub item_id: String,
    pub quantity: i64,
    pub unit_cost_minor: i64,
    pub reason: String,
    pub recorded_at: DateTime<Utc>,
}

/// Work order lifecycle: Pending -> InProgress -> Completed, no back edges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkOrderStatus {
    Pending,
    InProgress,
    Completed,
}

/// Raw material consumed by a work order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialUsed {
    pub item_id: String,
    pub quantity: i64,
    pub unit_cost_minor: i64,
}

/// Production job tracking material consumption and completion state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkOrder {
    pub id: String,
    pub sales_order_id: Option<String>,
    pub status: WorkOrderStatus,
    pub completion_pct: u8,
    pub quantity: i64,
    pub estimated_cost_minor: i64,
    pub labor_cost_minor: i64,
    pub overhead_cost_minor: i64,
    pub materials_used: Vec<MaterialUsed>,
    pub updated_at: DateTime<Utc>,
}

impl WorkOrder {
    /// Value of all issued materials
    pub fn material_cost_minor(&self) -> i64 {
        self.materials_used
            .iter()
            .map(|m| m.quantity * m.unit_cost_minor)
            .sum()
    }

    /// Material + labor + overhead
    pub fn total_cost_minor(&self) -> i64 {
        self.material_cost_minor() + self.labor_cost_minor + self.overhead_cost_minor
    }
}

/// Cost template used to estimate work-order cost from order line items
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Design {
    pub id: String,
    pub name: String,
    pub category: String,
    pub subcategory: Option<String>,
    pub material_cost_minor: i64,
    pub labor_cost_minor: i64,
    pub overhead_cost_minor: i64,
    /// Invariant: must equal material + labor + overhead. A maintenance job
    /// exists solely to repair violations.
    pub total_cost_minor: i64,
}

impl Design {
    pub fn component_sum_minor(&self) -> i64 {
        self.material_cost_minor + self.labor_cost_minor + self.overhead_cost_minor
    }
}

/// Issued customer invoice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    /// Deterministic invoice number, e.g. "INV-SO1001"
    pub id: String,
    pub order_id: Option<String>,
    pub work_order_id: Option<String>,
    pub customer_name: String,
    pub total_minor: i64,
    pub issued_at: DateTime<Utc>,
}

/// Customer payment receipt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: Uuid,
    pub invoice_id: Option<String>,
    pub amount_minor: i64,
    pub method: Option<String>,
    pub received_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_balance_follows_account_type() {
        assert_eq!(AccountType::Asset.normal_balance(), NormalBalance::Debit);
        assert_eq!(AccountType::Expense.normal_balance(), NormalBalance::Debit);
        assert_eq!(AccountType::Liability.normal_balance(), NormalBalance::Credit);
        assert_eq!(AccountType::Equity.normal_balance(), NormalBalance::Credit);
        assert_eq!(AccountType::Revenue.normal_balance(), NormalBalance::Credit);
    }

    #[test]
    fn journal_entry_totals() {
        let entry = JournalEntry {
            id: Uuid::new_v4(),
            effective_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            created_at: Utc::now(),
            linked_doc: None,
            lines: vec![
                JournalLine::debit("CASH", 40_000_00, "loan proceeds"),
                JournalLine::credit("SHORT_TERM_DEBT", 40_000_00, "loan principal"),
            ],
        };
        assert_eq!(entry.total_debits_minor(), 40_000_00);
        assert_eq!(entry.total_credits_minor(), 40_000_00);
    }

    #[test]
    fn work_order_cost_rollup() {
        let wo = WorkOrder {
            id: "WO-1".into(),
            sales_order_id: None,
            status: WorkOrderStatus::InProgress,
            completion_pct: 50,
            quantity: 2,
            estimated_cost_minor: 0,
            labor_cost_minor: 1_000,
            overhead_cost_minor: 500,
            materials_used: vec![MaterialUsed {
                item_id: "STEEL".into(),
                quantity: 3,
                unit_cost_minor: 200,
            }],
            updated_at: Utc::now(),
        };
        assert_eq!(wo.material_cost_minor(), 600);
        assert_eq!(wo.total_cost_minor(), 2_100);
    }
}
