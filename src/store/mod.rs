//! # Document store abstraction
//!
//! The ledger persists into a hosted document database with no multi-document
//! transactions: every read and write is an independent round trip. All
//! recorders and the reconciliation engine go through the [`DocumentStore`]
//! trait so the backend can be swapped by configuration (`STORE_TYPE`), the
//! same way the platform swaps its event bus between NATS and in-memory.
//!
//! ## Implementations
//!
//! - **MemoryStore**: in-process implementation used for dev and tests
//!
//! The single atomic primitive the backend offers is the clamped quantity
//! decrement on inventory items; everything else is plain get/put/list.

mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::{
    Account, Design, InventoryItem, InventoryMovement, Invoice, JournalEntry, Payment, WorkOrder,
};

/// Errors surfaced by a document store backend
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document store I/O failure: {0}")]
    Io(String),

    #[error("serialization failure: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence boundary for all ledger collections
///
/// `get_*` methods return `Ok(None)` for absent documents; mapping absence to
/// a not-found error is the caller's concern.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    // -- accounts ---------------------------------------------------------

    async fn get_account(&self, code: &str) -> StoreResult<Option<Account>>;
    async fn put_account(&self, account: Account) -> StoreResult<()>;
    async fn list_accounts(&self) -> StoreResult<Vec<Account>>;

    /// Overwrite an account's materialized balance. No-op precondition checks;
    /// the reconciliation engine is the only intended caller.
    async fn set_account_balance(
        &self,
        code: &str,
        balance_minor: i64,
        updated_at: DateTime<Utc>,
    ) -> StoreResult<()>;

    // -- journal log (append-only) ----------------------------------------

    async fn append_journal_entry(&self, entry: &JournalEntry) -> StoreResult<()>;

    /// Raw access to the journal collection. Documents written by older
    /// clients may not decode into [`JournalEntry`]; readers must tolerate
    /// malformed documents.
    async fn append_journal_raw(&self, doc: serde_json::Value) -> StoreResult<()>;
    async fn list_journal_raw(&self) -> StoreResult<Vec<serde_json::Value>>;

    // -- inventory --------------------------------------------------------

    async fn get_inventory_item(&self, id: &str) -> StoreResult<Option<InventoryItem>>;
    async fn put_inventory_item(&self, item: InventoryItem) -> StoreResult<()>;
    async fn list_inventory_items(&self) -> StoreResult<Vec<InventoryItem>>;

    /// Atomically subtract `by` from an item's quantity on hand, clamping the
    /// result at zero. Returns the new quantity, or `Ok(None)` if the item
    /// does not exist.
    async fn decrement_inventory_quantity(&self, id: &str, by: i64) -> StoreResult<Option<i64>>;

    async fn record_movement(&self, movement: &InventoryMovement) -> StoreResult<()>;
    async fn list_movements(&self, item_id: &str) -> StoreResult<Vec<InventoryMovement>>;

    // -- work orders ------------------------------------------------------

    async fn get_work_order(&self, id: &str) -> StoreResult<Option<WorkOrder>>;
    async fn put_work_order(&self, work_order: WorkOrder) -> StoreResult<()>;
    async fn list_work_orders(&self) -> StoreResult<Vec<WorkOrder>>;

    // -- designs ----------------------------------------------------------

    async fn get_design(&self, id: &str) -> StoreResult<Option<Design>>;
    async fn put_design(&self, design: Design) -> StoreResult<()>;
    async fn list_designs(&self) -> StoreResult<Vec<Design>>;

    // -- invoices / payments ----------------------------------------------

    async fn get_invoice(&self, id: &str) -> StoreResult<Option<Invoice>>;
    async fn put_invoice(&self, invoice: Invoice) -> StoreResult<()>;
    async fn list_invoices(&self) -> StoreResult<Vec<Invoice>>;

    async fn put_payment(&self, payment: Payment) -> StoreResult<()>;
    async fn list_payments(&self) -> StoreResult<Vec<Payment>>;
}
