//! Shared helpers for integration tests
#![allow(dead_code)]

use chrono::Utc;
use ledger_rs::coa;
use ledger_rs::models::{Design, InventoryItem, ItemType};
use ledger_rs::store::{DocumentStore, MemoryStore};

/// A memory store with the chart of accounts seeded
pub async fn seeded_store() -> MemoryStore {
    let store = MemoryStore::new();
    coa::seed_chart(&store).await.expect("seed chart");
    store
}

pub async fn put_raw_item(store: &MemoryStore, id: &str, quantity: i64, unit_cost_minor: i64) {
    store
        .put_inventory_item(InventoryItem {
            id: id.to_string(),
            name: id.to_string(),
            item_type: ItemType::Raw,
            quantity_on_hand: quantity,
            unit_cost_minor,
            updated_at: Utc::now(),
        })
        .await
        .expect("put inventory item");
}

pub async fn put_design(
    store: &MemoryStore,
    id: &str,
    name: &str,
    category: &str,
    material_minor: i64,
    labor_minor: i64,
    overhead_minor: i64,
) {
    store
        .put_design(Design {
            id: id.to_string(),
            name: name.to_string(),
            category: category.to_string(),
            subcategory: None,
            material_cost_minor: material_minor,
            labor_cost_minor: labor_minor,
            overhead_cost_minor: overhead_minor,
            total_cost_minor: material_minor + labor_minor + overhead_minor,
        })
        .await
        .expect("put design");
}

pub async fn account_balance(store: &MemoryStore, code: &str) -> i64 {
    store
        .get_account(code)
        .await
        .expect("get account")
        .expect("account exists")
        .balance_minor
}
