//! Work order recorders: creation, material issuance, completion
//!
//! Lifecycle: `Pending -> InProgress -> Completed`, no back edges and no
//! cancellation. Issuance moves value from raw stock into a WIP stock record
//! for the order; completion moves it on into finished goods. Keeping the
//! stock records in step means the overwrite-from-inventory accounts agree
//! with the journal entries booked here.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::coa;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{
    InventoryItem, InventoryMovement, ItemType, JournalLine, MaterialUsed, WorkOrder,
    WorkOrderStatus,
};
use crate::services::cost_rollup::{self, OrderItem};
use crate::services::journal_service::{self, NewJournalEntry};
use crate::services::recorders::{post_and_reconcile, Posting};
use crate::store::DocumentStore;

/// Idempotency token recorded as linked_doc on the completion entry
pub fn completion_token(work_order_id: &str) -> String {
    format!("wo:{work_order_id}:completed")
}

fn issuance_token(work_order_id: &str) -> String {
    format!("wo:{work_order_id}:issued")
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateWorkOrderRequest {
    pub id: String,
    pub sales_order_id: Option<String>,
    pub quantity: i64,
    /// Order line items used to estimate cost from designs
    pub items: Vec<OrderItem>,
}

#[derive(Debug, Serialize)]
pub struct CreateWorkOrderResult {
    pub work_order: WorkOrder,
    pub unresolved_items: usize,
}

/// Create a pending work order, estimating its cost from designs
pub async fn create_work_order(
    store: &dyn DocumentStore,
    request: CreateWorkOrderRequest,
) -> LedgerResult<CreateWorkOrderResult> {
    if request.id.is_empty() {
        return Err(LedgerError::validation("work order id is required"));
    }
    if request.quantity <= 0 {
        return Err(LedgerError::validation(format!(
            "work order quantity must be positive, got {}",
            request.quantity
        )));
    }
    if store.get_work_order(&request.id).await?.is_some() {
        return Err(LedgerError::validation(format!(
            "work order '{}' already exists",
            request.id
        )));
    }

    let costs = cost_rollup::calculate_order_costs_from_designs(store, &request.items).await?;

    let work_order = WorkOrder {
        id: request.id,
        sales_order_id: request.sales_order_id,
        status: WorkOrderStatus::Pending,
        completion_pct: 0,
        quantity: request.quantity,
        estimated_cost_minor: costs.total_estimated_minor,
        labor_cost_minor: costs.total_labor_minor,
        overhead_cost_minor: costs.total_overhead_minor,
        materials_used: Vec::new(),
        updated_at: Utc::now(),
    };
    store.put_work_order(work_order.clone()).await?;

    tracing::info!(
        work_order_id = %work_order.id,
        estimated_cost_minor = work_order.estimated_cost_minor,
        "Work order created"
    );

    Ok(CreateWorkOrderResult {
        unresolved_items: costs.items.iter().filter(|i| !i.resolved).count(),
        work_order,
    })
}

#[derive(Debug, Clone, Deserialize)]
pub struct MaterialRequest {
    pub item_id: String,
    pub quantity: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IssueMaterialsRequest {
    pub materials: Vec<MaterialRequest>,
}

#[derive(Debug, Serialize)]
pub struct IssueMaterialsResult {
    /// None when the issued value was zero
    pub posting: Option<Posting>,
    pub total_cost_minor: i64,
    pub work_order: WorkOrder,
    pub warnings: Vec<String>,
}

/// Issue raw materials to a pending work order
///
/// Debits INVENTORY_WIP and credits INVENTORY_RAW for the value of the issued
/// materials, decrements each consumed item's quantity on hand (clamped at
/// zero), moves the value into a per-order WIP stock record, and transitions
/// the order to InProgress.
pub async fn issue_materials(
    store: &dyn DocumentStore,
    work_order_id: &str,
    request: IssueMaterialsRequest,
) -> LedgerResult<IssueMaterialsResult> {
    let mut work_order = store
        .get_work_order(work_order_id)
        .await?
        .ok_or_else(|| LedgerError::not_found("work order", work_order_id))?;

    if work_order.status != WorkOrderStatus::Pending {
        return Err(LedgerError::validation(format!(
            "work order '{work_order_id}' is {:?}, materials can only be issued while pending",
            work_order.status
        )));
    }
    if request.materials.is_empty() {
        return Err(LedgerError::validation("materials list is empty"));
    }

    let mut used = Vec::with_capacity(request.materials.len());
    let mut total_minor = 0i64;

    for material in &request.materials {
        if material.quantity <= 0 {
            return Err(LedgerError::validation(format!(
                "material quantity must be positive, got {} for '{}'",
                material.quantity, material.item_id
            )));
        }
        let item = store
            .get_inventory_item(&material.item_id)
            .await?
            .ok_or_else(|| LedgerError::not_found("inventory item", material.item_id.clone()))?;

        store
            .decrement_inventory_quantity(&material.item_id, material.quantity)
            .await?;
        store
            .record_movement(&InventoryMovement {
                id: Uuid::new_v4(),
                item_id: material.item_id.clone(),
                quantity: -material.quantity,
                unit_cost_minor: item.unit_cost_minor,
                reason: format!("issued to work order {work_order_id}"),
                recorded_at: Utc::now(),
            })
            .await?;

        total_minor += material.quantity * item.unit_cost_minor;
        used.push(MaterialUsed {
            item_id: material.item_id.clone(),
            quantity: material.quantity,
            unit_cost_minor: item.unit_cost_minor,
        });
    }

    // Move the issued value into a per-order WIP stock record so the
    // inventory collection stays authoritative for WIP valuation.
    store
        .put_inventory_item(InventoryItem {
            id: format!("WIP-{work_order_id}"),
            name: format!("WIP for {work_order_id}"),
            item_type: ItemType::Wip,
            quantity_on_hand: 1,
            unit_cost_minor: total_minor,
            updated_at: Utc::now(),
        })
        .await?;

    work_order.status = WorkOrderStatus::InProgress;
    work_order.materials_used = used;
    work_order.updated_at = Utc::now();
    store.put_work_order(work_order.clone()).await?;

    if total_minor == 0 {
        return Ok(IssueMaterialsResult {
            posting: None,
            total_cost_minor: 0,
            work_order,
            warnings: Vec::new(),
        });
    }

    let description = format!("Materials issued to work order {work_order_id}");
    let (posting, warnings) = post_and_reconcile(
        store,
        NewJournalEntry::new(
            vec![
                JournalLine::debit(coa::INVENTORY_WIP, total_minor, &description),
                JournalLine::credit(coa::INVENTORY_RAW, total_minor, &description),
            ],
            Some(issuance_token(work_order_id)),
        ),
    )
    .await?;

    Ok(IssueMaterialsResult {
        posting: Some(posting),
        total_cost_minor: total_minor,
        work_order,
        warnings,
    })
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompleteWorkOrderRequest {
    pub design_id: Option<String>,
    /// Finished-goods quantity; defaults to the work order quantity
    pub quantity: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct CompletionResult {
    /// None when the completion had already been recorded
    pub posting: Option<Posting>,
    pub already_completed: bool,
    pub total_cost_minor: i64,
    pub warnings: Vec<String>,
}

/// Complete a work order: debit INVENTORY_FINISHED, credit INVENTORY_WIP
///
/// Idempotent: the completion entry is keyed on `wo:{id}:completed`; if that
/// token is already present in the journal (or the order is already marked
/// completed) the call is a no-op reporting `already_completed`.
pub async fn complete_work_order(
    store: &dyn DocumentStore,
    work_order_id: &str,
    request: CompleteWorkOrderRequest,
) -> LedgerResult<CompletionResult> {
    let mut work_order = store
        .get_work_order(work_order_id)
        .await?
        .ok_or_else(|| LedgerError::not_found("work order", work_order_id))?;

    let token = completion_token(work_order_id);
    let existing = journal_service::list_by_linked_doc(store, &token).await?;
    if work_order.status == WorkOrderStatus::Completed || !existing.is_empty() {
        tracing::info!(work_order_id, "Work order already completed, skipping");
        return Ok(CompletionResult {
            posting: None,
            already_completed: true,
            total_cost_minor: work_order.total_cost_minor(),
            warnings: Vec::new(),
        });
    }

    if work_order.status != WorkOrderStatus::InProgress {
        return Err(LedgerError::validation(format!(
            "work order '{work_order_id}' is {:?}, it must be in progress to complete",
            work_order.status
        )));
    }

    let total_minor = work_order.total_cost_minor();
    let quantity = request.quantity.unwrap_or(work_order.quantity).max(1);

    // Drain the per-order WIP record and move its value into finished goods.
    let wip_id = format!("WIP-{work_order_id}");
    if let Some(mut wip) = store.get_inventory_item(&wip_id).await? {
        wip.quantity_on_hand = 0;
        wip.updated_at = Utc::now();
        store.put_inventory_item(wip).await?;
    }

    let unit_cost_minor = total_minor / quantity;
    if unit_cost_minor * quantity != total_minor {
        tracing::warn!(
            work_order_id,
            total_minor,
            quantity,
            "Work order cost does not divide evenly over finished units"
        );
    }
    let fg_id = match &request.design_id {
        Some(design_id) => format!("FG-{design_id}-{work_order_id}"),
        None => format!("FG-{work_order_id}"),
    };
    store
        .put_inventory_item(InventoryItem {
            id: fg_id,
            name: format!("Finished goods for {work_order_id}"),
            item_type: ItemType::Finished,
            quantity_on_hand: quantity,
            unit_cost_minor,
            updated_at: Utc::now(),
        })
        .await?;

    work_order.status = WorkOrderStatus::Completed;
    work_order.completion_pct = 100;
    work_order.updated_at = Utc::now();
    store.put_work_order(work_order).await?;

    if total_minor == 0 {
        return Ok(CompletionResult {
            posting: None,
            already_completed: false,
            total_cost_minor: 0,
            warnings: Vec::new(),
        });
    }

    let description = format!("Work order {work_order_id} completed");
    let (posting, warnings) = post_and_reconcile(
        store,
        NewJournalEntry::new(
            vec![
                JournalLine::debit(coa::INVENTORY_FINISHED, total_minor, &description),
                JournalLine::credit(coa::INVENTORY_WIP, total_minor, &description),
            ],
            Some(token),
        ),
    )
    .await?;

    Ok(CompletionResult {
        posting: Some(posting),
        already_completed: false,
        total_cost_minor: total_minor,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completion_token_is_stable() {
        assert_eq!(completion_token("WO-7"), "wo:WO-7:completed");
        assert_eq!(completion_token("WO-7"), completion_token("WO-7"));
    }
}
