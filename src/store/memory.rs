//! In-memory implementation of the DocumentStore trait for dev and tests

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::models::{
    Account, Design, InventoryItem, InventoryMovement, Invoice, JournalEntry, Payment, WorkOrder,
};
use crate::store::{DocumentStore, StoreError, StoreResult};

/// Document store backed by in-process maps
///
/// Suitable for unit and integration tests (no external dependencies) and for
/// local development without a hosted database. Collections live behind
/// independent `tokio::sync::RwLock`s; like the hosted backend, there is no
/// cross-collection transaction.
#[derive(Default)]
pub struct MemoryStore {
    accounts: RwLock<HashMap<String, Account>>,
    journal: RwLock<Vec<serde_json::Value>>,
    inventory: RwLock<HashMap<String, InventoryItem>>,
    movements: RwLock<Vec<InventoryMovement>>,
    work_orders: RwLock<HashMap<String, WorkOrder>>,
    designs: RwLock<HashMap<String, Design>>,
    invoices: RwLock<HashMap<String, Invoice>>,
    payments: RwLock<Vec<Payment>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get_account(&self, code: &str) -> StoreResult<Option<Account>> {
        Ok(self.accounts.read().await.get(code).cloned())
    }

    async fn put_account(&self, account: Account) -> StoreResult<()> {
        self.accounts
            .write()
            .await
            .insert(account.code.clone(), account);
        Ok(())
    }

    async fn list_accounts(&self) -> StoreResult<Vec<Account>> {
        let mut accounts: Vec<Account> = self.accounts.read().await.values().cloned().collect();
        accounts.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(accounts)
    }

    async fn set_account_balance(
        &self,
        code: &str,
        balance_minor: i64,
        updated_at: DateTime<Utc>,
    ) -> StoreResult<()> {
        let mut accounts = self.accounts.write().await;
        let account = accounts
            .get_mut(code)
            .ok_or_else(|| StoreError::Io(format!("account document missing: {code}")))?;
        account.balance_minor = balance_minor;
        account.updated_at = updated_at;
        Ok(())
    }

    async fn append_journal_entry(&self, entry: &JournalEntry) -> StoreResult<()> {
        let doc = serde_json::to_value(entry)?;
        self.journal.write().await.push(doc);
        Ok(())
    }

    async fn append_journal_raw(&self, doc: serde_json::Value) -> StoreResult<()> {
        self.journal.write().await.push(doc);
        Ok(())
    }

    async fn list_journal_raw(&self) -> StoreResult<Vec<serde_json::Value>> {
        Ok(self.journal.read().await.clone())
    }

    async fn get_inventory_item(&self, id: &str) -> StoreResult<Option<InventoryItem>> {
        Ok(self.inventory.read().await.get(id).cloned())
    }

    async fn put_inventory_item(&self, item: InventoryItem) -> StoreResult<()> {
        self.inventory.write().await.insert(item.id.clone(), item);
        Ok(())
    }

    async fn list_inventory_items(&self) -> StoreResult<Vec<InventoryItem>> {
        let mut items: Vec<InventoryItem> = self.inventory.read().await.values().cloned().collect();
        items.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(items)
    }

    async fn decrement_inventory_quantity(&self, id: &str, by: i64) -> StoreResult<Option<i64>> {
        let mut inventory = self.inventory.write().await;
        match inventory.get_mut(id) {
            Some(item) => {
                item.quantity_on_hand = (item.quantity_on_hand - by).max(0);
                item.updated_at = Utc::now();
                Ok(Some(item.quantity_on_hand))
            }
            None => Ok(None),
        }
    }

    async fn record_movement(&self, movement: &InventoryMovement) -> StoreResult<()> {
        self.movements.write().await.push(movement.clone());
        Ok(())
    }

    async fn list_movements(&self, item_id: &str) -> StoreResult<Vec<InventoryMovement>> {
        Ok(self
            .movements
            .read()
            .await
            .iter()
            .filter(|m| m.item_id == item_id)
            .cloned()
            .collect())
    }

    async fn get_work_order(&self, id: &str) -> StoreResult<Option<WorkOrder>> {
        Ok(self.work_orders.read().await.get(id).cloned())
    }

    async fn put_work_order(&self, work_order: WorkOrder) -> StoreResult<()> {
        self.work_orders
            .write()
            .await
            .insert(work_order.id.clone(), work_order);
        Ok(())
    }

    async fn list_work_orders(&self) -> StoreResult<Vec<WorkOrder>> {
        let mut orders: Vec<WorkOrder> = self.work_orders.read().await.values().cloned().collect();
        orders.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(orders)
    }

    async fn get_design(&self, id: &str) -> StoreResult<Option<Design>> {
        Ok(self.designs.read().await.get(id).cloned())
    }

    async fn put_design(&self, design: Design) -> StoreResult<()> {
        self.designs.write().await.insert(design.id.clone(), design);
        Ok(())
    }

    async fn list_designs(&self) -> StoreResult<Vec<Design>> {
        let mut designs: Vec<Design> = self.designs.read().await.values().cloned().collect();
        designs.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(designs)
    }

    async fn get_invoice(&self, id: &str) -> StoreResult<Option<Invoice>> {
        Ok(self.invoices.read().await.get(id).cloned())
    }

    async fn put_invoice(&self, invoice: Invoice) -> StoreResult<()> {
        self.invoices
            .write()
            .await
            .insert(invoice.id.clone(), invoice);
        Ok(())
    }

    async fn list_invoices(&self) -> StoreResult<Vec<Invoice>> {
        let mut invoices: Vec<Invoice> = self.invoices.read().await.values().cloned().collect();
        invoices.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(invoices)
    }

    async fn put_payment(&self, payment: Payment) -> StoreResult<()> {
        self.payments.write().await.push(payment);
        Ok(())
    }

    async fn list_payments(&self) -> StoreResult<Vec<Payment>> {
        Ok(self.payments.read().await.clone())
    }
}
