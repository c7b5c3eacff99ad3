//! Inventory purchase and adjustment recorder behavior

mod common;

use common::{account_balance, put_raw_item, seeded_store};
use ledger_rs::coa;
use ledger_rs::error::LedgerError;
use ledger_rs::services::recorders::inventory::{
    adjust_inventory, record_purchase, AdjustmentMode, AdjustmentRequest, PurchaseRequest,
};
use ledger_rs::store::DocumentStore;

#[tokio::test]
async fn purchase_books_raw_against_cash() {
    let store = seeded_store().await;

    let result = record_purchase(
        &store,
        PurchaseRequest {
            item_id: "STEEL".into(),
            name: "Steel sheet".into(),
            quantity: 20,
            unit_cost_minor: 350,
        },
    )
    .await
    .unwrap();

    assert!(result.posting.is_some());
    assert_eq!(result.item.quantity_on_hand, 20);
    assert_eq!(account_balance(&store, coa::INVENTORY_RAW).await, 7_000);
    assert_eq!(account_balance(&store, coa::CASH).await, -7_000);

    let movements = store.list_movements("STEEL").await.unwrap();
    assert_eq!(movements.len(), 1);
    assert_eq!(movements[0].quantity, 20);
}

#[tokio::test]
async fn repeat_purchase_accumulates_quantity() {
    let store = seeded_store().await;
    for _ in 0..2 {
        record_purchase(
            &store,
            PurchaseRequest {
                item_id: "STEEL".into(),
                name: "Steel sheet".into(),
                quantity: 5,
                unit_cost_minor: 100,
            },
        )
        .await
        .unwrap();
    }
    let item = store.get_inventory_item("STEEL").await.unwrap().unwrap();
    assert_eq!(item.quantity_on_hand, 10);
    assert_eq!(account_balance(&store, coa::INVENTORY_RAW).await, 1_000);
}

#[tokio::test]
async fn zero_cost_purchase_skips_journal_entry() {
    let store = seeded_store().await;
    let result = record_purchase(
        &store,
        PurchaseRequest {
            item_id: "SCRAP".into(),
            name: "Donated scrap".into(),
            quantity: 50,
            unit_cost_minor: 0,
        },
    )
    .await
    .unwrap();

    assert!(result.posting.is_none());
    assert_eq!(result.item.quantity_on_hand, 50);
    assert!(ledger_rs::services::journal_service::list_entries(&store)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn negative_quantity_purchase_rejected() {
    let store = seeded_store().await;
    let result = record_purchase(
        &store,
        PurchaseRequest {
            item_id: "STEEL".into(),
            name: "Steel".into(),
            quantity: -1,
            unit_cost_minor: 100,
        },
    )
    .await;
    assert!(matches!(result, Err(LedgerError::Validation(_))));
}

#[tokio::test]
async fn subtract_past_zero_clamps() {
    let store = seeded_store().await;
    // 10 on hand at cost 5
    put_raw_item(&store, "BOLTS", 10, 5).await;

    let result = adjust_inventory(
        &store,
        AdjustmentRequest {
            item_id: "BOLTS".into(),
            quantity: 15,
            reason: "cycle count".into(),
            mode: AdjustmentMode::Subtract,
        },
    )
    .await
    .unwrap();

    assert_eq!(result.actual_adjustment, -10);
    assert_eq!(result.new_quantity, 0);

    let movements = store.list_movements("BOLTS").await.unwrap();
    assert_eq!(movements.len(), 1);
    assert_eq!(movements[0].quantity, -10);

    // Shrinkage of 10 units at cost 5 lands in the adjustment expense
    assert_eq!(account_balance(&store, coa::INVENTORY_ADJUSTMENT).await, 50);
    assert_eq!(account_balance(&store, coa::INVENTORY_RAW).await, 0);
}

#[tokio::test]
async fn set_mode_books_increase() {
    let store = seeded_store().await;
    put_raw_item(&store, "BOLTS", 10, 5).await;

    let result = adjust_inventory(
        &store,
        AdjustmentRequest {
            item_id: "BOLTS".into(),
            quantity: 25,
            reason: "found stock".into(),
            mode: AdjustmentMode::Set,
        },
    )
    .await
    .unwrap();

    assert_eq!(result.actual_adjustment, 15);
    assert_eq!(result.new_quantity, 25);
    assert_eq!(account_balance(&store, coa::INVENTORY_RAW).await, 125);
    assert_eq!(account_balance(&store, coa::INVENTORY_ADJUSTMENT).await, -75);
}

#[tokio::test]
async fn no_op_adjustment_skips_entry_and_movement() {
    let store = seeded_store().await;
    put_raw_item(&store, "BOLTS", 10, 5).await;

    let result = adjust_inventory(
        &store,
        AdjustmentRequest {
            item_id: "BOLTS".into(),
            quantity: 10,
            reason: "cycle count".into(),
            mode: AdjustmentMode::Set,
        },
    )
    .await
    .unwrap();

    assert!(result.posting.is_none());
    assert_eq!(result.actual_adjustment, 0);
    assert!(store.list_movements("BOLTS").await.unwrap().is_empty());
}

#[tokio::test]
async fn adjusting_missing_item_is_not_found() {
    let store = seeded_store().await;
    let result = adjust_inventory(
        &store,
        AdjustmentRequest {
            item_id: "GHOST".into(),
            quantity: 1,
            reason: "test".into(),
            mode: AdjustmentMode::Add,
        },
    )
    .await;
    assert!(matches!(result, Err(LedgerError::NotFound { .. })));
}
