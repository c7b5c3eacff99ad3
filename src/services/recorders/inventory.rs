//! Inventory recorders: purchases and quantity adjustments
//!
//! Both recorders keep the inventory item collection authoritative for stock
//! valuation and book the journal entry as the historical record. The
//! INVENTORY_RAW account itself is reconciled by overwrite-from-inventory.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::coa;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{InventoryItem, InventoryMovement, ItemType, JournalLine};
use crate::services::journal_service::NewJournalEntry;
use crate::services::recorders::{post_and_reconcile, Posting};
use crate::store::DocumentStore;

#[derive(Debug, Clone, Deserialize)]
pub struct PurchaseRequest {
    pub item_id: String,
    pub name: String,
    pub quantity: i64,
    pub unit_cost_minor: i64,
}

#[derive(Debug, Serialize)]
pub struct PurchaseResult {
    /// None when the purchase value was zero (explicit skip policy)
    pub posting: Option<Posting>,
    pub item: InventoryItem,
    pub warnings: Vec<String>,
}

/// Record a raw-material purchase: debit INVENTORY_RAW, credit CASH
///
/// Zero-cost purchases update the stock record but emit no journal entry.
pub async fn record_purchase(
    store: &dyn DocumentStore,
    request: PurchaseRequest,
) -> LedgerResult<PurchaseResult> {
    if request.item_id.is_empty() {
        return Err(LedgerError::validation("item_id is required"));
    }
    if request.quantity <= 0 {
        return Err(LedgerError::validation(format!(
            "purchase quantity must be positive, got {}",
            request.quantity
        )));
    }
    if request.unit_cost_minor < 0 {
        return Err(LedgerError::validation(format!(
            "unit cost must be non-negative, got {}",
            request.unit_cost_minor
        )));
    }

    // Upsert the stock record. The latest purchase price becomes the carrying
    // cost (no weighted-average costing at this scale).
    let item = match store.get_inventory_item(&request.item_id).await? {
        Some(mut existing) => {
            existing.quantity_on_hand += request.quantity;
            existing.unit_cost_minor = request.unit_cost_minor;
            existing.updated_at = Utc::now();
            existing
        }
        None => InventoryItem {
            id: request.item_id.clone(),
            name: request.name.clone(),
            item_type: ItemType::Raw,
            quantity_on_hand: request.quantity,
            unit_cost_minor: request.unit_cost_minor,
            updated_at: Utc::now(),
        },
    };
    store.put_inventory_item(item.clone()).await?;

    store
        .record_movement(&InventoryMovement {
            id: Uuid::new_v4(),
            item_id: request.item_id.clone(),
            quantity: request.quantity,
            unit_cost_minor: request.unit_cost_minor,
            reason: "purchase".to_string(),
            recorded_at: Utc::now(),
        })
        .await?;

    let total_minor = request.quantity * request.unit_cost_minor;
    if total_minor == 0 {
        tracing::info!(item_id = %request.item_id, "Zero-cost purchase, no journal entry");
        return Ok(PurchaseResult {
            posting: None,
            item,
            warnings: Vec::new(),
        });
    }

    let description = format!(
        "Purchase {} x {} @ {}",
        request.quantity, request.name, request.unit_cost_minor
    );
    let (posting, warnings) = post_and_reconcile(
        store,
        NewJournalEntry::new(
            vec![
                JournalLine::debit(coa::INVENTORY_RAW, total_minor, &description),
                JournalLine::credit(coa::CASH, total_minor, &description),
            ],
            Some(format!("purchase:{}", request.item_id)),
        ),
    )
    .await?;

    Ok(PurchaseResult {
        posting: Some(posting),
        item,
        warnings,
    })
}

/// How the adjustment quantity is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdjustmentMode {
    /// Absolute target quantity
    Set,
    Add,
    Subtract,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdjustmentRequest {
    pub item_id: String,
    pub quantity: i64,
    pub reason: String,
    pub mode: AdjustmentMode,
}

#[derive(Debug, Serialize)]
pub struct AdjustmentResult {
    /// None when the value of the change was zero
    pub posting: Option<Posting>,
    /// Signed change actually applied after clamping
    pub actual_adjustment: i64,
    pub new_quantity: i64,
    pub warnings: Vec<String>,
}

/// Signed change to apply so the resulting quantity never goes below zero
pub fn clamped_adjustment(current: i64, quantity: i64, mode: AdjustmentMode) -> i64 {
    let requested = match mode {
        AdjustmentMode::Set => quantity.max(0) - current,
        AdjustmentMode::Add => quantity,
        AdjustmentMode::Subtract => -quantity,
    };
    if current + requested < 0 {
        -current
    } else {
        requested
    }
}

/// Adjust an item's quantity on hand, booking the value of the change
///
/// Increases debit INVENTORY_RAW against the INVENTORY_ADJUSTMENT expense
/// account; decreases run the other way. A zero-value change records the
/// movement but skips the journal entry.
pub async fn adjust_inventory(
    store: &dyn DocumentStore,
    request: AdjustmentRequest,
) -> LedgerResult<AdjustmentResult> {
    if request.quantity < 0 {
        return Err(LedgerError::validation(format!(
            "adjustment quantity must be non-negative, got {}",
            request.quantity
        )));
    }

    let mut item = store
        .get_inventory_item(&request.item_id)
        .await?
        .ok_or_else(|| LedgerError::not_found("inventory item", request.item_id.clone()))?;

    let actual = clamped_adjustment(item.quantity_on_hand, request.quantity, request.mode);
    let new_quantity = item.quantity_on_hand + actual;

    item.quantity_on_hand = new_quantity;
    item.updated_at = Utc::now();
    store.put_inventory_item(item.clone()).await?;

    if actual != 0 {
        store
            .record_movement(&InventoryMovement {
                id: Uuid::new_v4(),
                item_id: request.item_id.clone(),
                quantity: actual,
                unit_cost_minor: item.unit_cost_minor,
                reason: request.reason.clone(),
                recorded_at: Utc::now(),
            })
            .await?;
    }

    let value_minor = actual.abs() * item.unit_cost_minor;
    if value_minor == 0 {
        return Ok(AdjustmentResult {
            posting: None,
            actual_adjustment: actual,
            new_quantity,
            warnings: Vec::new(),
        });
    }

    let description = format!("Inventory adjustment ({}): {}", request.item_id, request.reason);
    let lines = if actual > 0 {
        vec![
            JournalLine::debit(coa::INVENTORY_RAW, value_minor, &description),
            JournalLine::credit(coa::INVENTORY_ADJUSTMENT, value_minor, &description),
        ]
    } else {
        vec![
            JournalLine::debit(coa::INVENTORY_ADJUSTMENT, value_minor, &description),
            JournalLine::credit(coa::INVENTORY_RAW, value_minor, &description),
        ]
    };

    let (posting, warnings) = post_and_reconcile(
        store,
        NewJournalEntry::new(lines, Some(format!("adjustment:{}", request.item_id))),
    )
    .await?;

    Ok(AdjustmentResult {
        posting: Some(posting),
        actual_adjustment: actual,
        new_quantity,
        warnings,
    })
}
