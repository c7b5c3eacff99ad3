//! Cost rollup: estimate order cost from design templates
//!
//! Resolves each order line item to a design by product id, then by fuzzy
//! case-insensitive name containment, then by category. Unresolved items
//! contribute zero cost and a per-item warning; the batch only fails when
//! every item is unresolved.

use serde::{Deserialize, Serialize};

use crate::error::LedgerResult;
use crate::models::Design;
use crate::store::DocumentStore;

/// Order line item to be costed
#[derive(Debug, Clone, Deserialize)]
pub struct OrderItem {
    pub product_id: Option<String>,
    pub name: Option<String>,
    pub category: Option<String>,
    pub quantity: i64,
}

/// Per-item rollup outcome
#[derive(Debug, Serialize)]
pub struct ItemCost {
    pub resolved: bool,
    pub design_id: Option<String>,
    pub quantity: i64,
    pub material_minor: i64,
    pub labor_minor: i64,
    pub overhead_minor: i64,
    pub estimated_minor: i64,
    pub warning: Option<String>,
}

/// Aggregated rollup across an order
#[derive(Debug, Serialize)]
pub struct OrderCosts {
    /// False only when every item failed to resolve
    pub success: bool,
    pub items: Vec<ItemCost>,
    pub total_material_minor: i64,
    pub total_labor_minor: i64,
    pub total_overhead_minor: i64,
    pub total_estimated_minor: i64,
}

fn resolve<'a>(designs: &'a [Design], item: &OrderItem) -> Option<&'a Design> {
    if let Some(product_id) = &item.product_id {
        if let Some(design) = designs.iter().find(|d| &d.id == product_id) {
            return Some(design);
        }
    }
    if let Some(name) = &item.name {
        let needle = name.to_lowercase();
        if let Some(design) = designs.iter().find(|d| {
            let design_name = d.name.to_lowercase();
            design_name.contains(&needle) || needle.contains(&design_name)
        }) {
            return Some(design);
        }
    }
    if let Some(category) = &item.category {
        if let Some(design) = designs
            .iter()
            .find(|d| d.category.eq_ignore_ascii_case(category))
        {
            return Some(design);
        }
    }
    None
}

/// Pure rollup over an in-memory design list
pub fn calculate_order_costs(designs: &[Design], items: &[OrderItem]) -> OrderCosts {
    let mut out = OrderCosts {
        success: true,
        items: Vec::with_capacity(items.len()),
        total_material_minor: 0,
        total_labor_minor: 0,
        total_overhead_minor: 0,
        total_estimated_minor: 0,
    };

    let mut resolved_count = 0usize;

    for item in items {
        let quantity = item.quantity.max(0);
        match resolve(designs, item) {
            Some(design) => {
                resolved_count += 1;
                let material = design.material_cost_minor * quantity;
                let labor = design.labor_cost_minor * quantity;
                let overhead = design.overhead_cost_minor * quantity;
                let estimated = design.total_cost_minor * quantity;
                out.total_material_minor += material;
                out.total_labor_minor += labor;
                out.total_overhead_minor += overhead;
                out.total_estimated_minor += estimated;
                out.items.push(ItemCost {
                    resolved: true,
                    design_id: Some(design.id.clone()),
                    quantity,
                    material_minor: material,
                    labor_minor: labor,
                    overhead_minor: overhead,
                    estimated_minor: estimated,
                    warning: None,
                });
            }
            None => {
                let label = item
                    .product_id
                    .clone()
                    .or_else(|| item.name.clone())
                    .or_else(|| item.category.clone())
                    .unwrap_or_else(|| "<unidentified>".to_string());
                tracing::warn!(item = %label, "No design resolved for order item");
                out.items.push(ItemCost {
                    resolved: false,
                    design_id: None,
                    quantity,
                    material_minor: 0,
                    labor_minor: 0,
                    overhead_minor: 0,
                    estimated_minor: 0,
                    warning: Some(format!("no design resolved for '{label}'")),
                });
            }
        }
    }

    if !items.is_empty() && resolved_count == 0 {
        out.success = false;
    }

    out
}

/// Store-backed rollup used by work order creation
pub async fn calculate_order_costs_from_designs(
    store: &dyn DocumentStore,
    items: &[OrderItem],
) -> LedgerResult<OrderCosts> {
    let designs = store.list_designs().await?;
    Ok(calculate_order_costs(&designs, items))
}
