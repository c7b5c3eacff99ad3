//! Work order lifecycle: create, issue materials, complete

mod common;

use common::{account_balance, put_design, put_raw_item, seeded_store};
use ledger_rs::coa;
use ledger_rs::error::LedgerError;
use ledger_rs::models::WorkOrderStatus;
use ledger_rs::services::cost_rollup::OrderItem;
use ledger_rs::services::journal_service;
use ledger_rs::services::recorders::work_orders::{
    complete_work_order, completion_token, create_work_order, issue_materials,
    CompleteWorkOrderRequest, CreateWorkOrderRequest, IssueMaterialsRequest, MaterialRequest,
};
use ledger_rs::store::{DocumentStore, MemoryStore};

fn order_item(product_id: &str, quantity: i64) -> OrderItem {
    OrderItem {
        product_id: Some(product_id.to_string()),
        name: None,
        category: None,
        quantity,
    }
}

async fn prepared_store() -> MemoryStore {
    let store = seeded_store().await;
    // Design: material 50, labor 25, overhead 25 => total 100 per unit
    put_design(&store, "D1", "Widget", "widgets", 50, 25, 25).await;
    put_raw_item(&store, "STEEL", 10, 500).await;
    store
}

async fn create_standard(store: &MemoryStore) {
    create_work_order(
        store,
        CreateWorkOrderRequest {
            id: "WO-1".into(),
            sales_order_id: Some("SO-1001".into()),
            quantity: 2,
            items: vec![order_item("D1", 2)],
        },
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn create_estimates_cost_from_designs() {
    let store = prepared_store().await;
    let result = create_work_order(
        &store,
        CreateWorkOrderRequest {
            id: "WO-1".into(),
            sales_order_id: None,
            quantity: 2,
            items: vec![order_item("D1", 2), order_item("MISSING", 1)],
        },
    )
    .await
    .unwrap();

    assert_eq!(result.work_order.status, WorkOrderStatus::Pending);
    assert_eq!(result.work_order.estimated_cost_minor, 200);
    assert_eq!(result.work_order.labor_cost_minor, 50);
    assert_eq!(result.work_order.overhead_cost_minor, 50);
    assert_eq!(result.unresolved_items, 1);
}

#[tokio::test]
async fn duplicate_work_order_rejected() {
    let store = prepared_store().await;
    create_standard(&store).await;
    let result = create_work_order(
        &store,
        CreateWorkOrderRequest {
            id: "WO-1".into(),
            sales_order_id: None,
            quantity: 1,
            items: vec![],
        },
    )
    .await;
    assert!(matches!(result, Err(LedgerError::Validation(_))));
}

#[tokio::test]
async fn issuance_moves_raw_into_wip() {
    let store = prepared_store().await;
    create_standard(&store).await;

    let result = issue_materials(
        &store,
        "WO-1",
        IssueMaterialsRequest {
            materials: vec![MaterialRequest {
                item_id: "STEEL".into(),
                quantity: 4,
            }],
        },
    )
    .await
    .unwrap();

    assert_eq!(result.total_cost_minor, 2_000);
    assert_eq!(result.work_order.status, WorkOrderStatus::InProgress);

    let steel = store.get_inventory_item("STEEL").await.unwrap().unwrap();
    assert_eq!(steel.quantity_on_hand, 6);

    assert_eq!(account_balance(&store, coa::INVENTORY_RAW).await, 6 * 500);
    assert_eq!(account_balance(&store, coa::INVENTORY_WIP).await, 2_000);
}

#[tokio::test]
async fn issuance_requires_pending_status() {
    let store = prepared_store().await;
    create_standard(&store).await;
    let request = IssueMaterialsRequest {
        materials: vec![MaterialRequest {
            item_id: "STEEL".into(),
            quantity: 1,
        }],
    };
    issue_materials(&store, "WO-1", request.clone()).await.unwrap();

    let result = issue_materials(&store, "WO-1", request).await;
    assert!(matches!(result, Err(LedgerError::Validation(_))));
}

#[tokio::test]
async fn completion_moves_wip_into_finished() {
    let store = prepared_store().await;
    create_standard(&store).await;
    issue_materials(
        &store,
        "WO-1",
        IssueMaterialsRequest {
            materials: vec![MaterialRequest {
                item_id: "STEEL".into(),
                quantity: 4,
            }],
        },
    )
    .await
    .unwrap();

    let result = complete_work_order(&store, "WO-1", CompleteWorkOrderRequest::default())
        .await
        .unwrap();

    // materials 2000 + labor 50 + overhead 50
    assert!(!result.already_completed);
    assert_eq!(result.total_cost_minor, 2_100);

    let work_order = store.get_work_order("WO-1").await.unwrap().unwrap();
    assert_eq!(work_order.status, WorkOrderStatus::Completed);
    assert_eq!(work_order.completion_pct, 100);

    assert_eq!(account_balance(&store, coa::INVENTORY_WIP).await, 0);
    assert_eq!(account_balance(&store, coa::INVENTORY_FINISHED).await, 2_100);
}

#[tokio::test]
async fn double_completion_is_idempotent() {
    let store = prepared_store().await;
    create_standard(&store).await;
    issue_materials(
        &store,
        "WO-1",
        IssueMaterialsRequest {
            materials: vec![MaterialRequest {
                item_id: "STEEL".into(),
                quantity: 4,
            }],
        },
    )
    .await
    .unwrap();

    complete_work_order(&store, "WO-1", CompleteWorkOrderRequest::default())
        .await
        .unwrap();
    let second = complete_work_order(&store, "WO-1", CompleteWorkOrderRequest::default())
        .await
        .unwrap();

    assert!(second.already_completed);
    assert!(second.posting.is_none());

    let completions = journal_service::list_by_linked_doc(&store, &completion_token("WO-1"))
        .await
        .unwrap();
    assert_eq!(completions.len(), 1);
    assert_eq!(account_balance(&store, coa::INVENTORY_FINISHED).await, 2_100);
}

#[tokio::test]
async fn completing_pending_order_rejected() {
    let store = prepared_store().await;
    create_standard(&store).await;
    let result = complete_work_order(&store, "WO-1", CompleteWorkOrderRequest::default()).await;
    assert!(matches!(result, Err(LedgerError::Validation(_))));
}

#[tokio::test]
async fn completing_missing_order_is_not_found() {
    let store = prepared_store().await;
    let result = complete_work_order(&store, "GHOST", CompleteWorkOrderRequest::default()).await;
    assert!(matches!(result, Err(LedgerError::NotFound { .. })));
}
