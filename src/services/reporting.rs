//! Read-only reporting over the journal log and ledger store
//!
//! No mutation happens here; reports are derived fresh on every call.

use serde::Serialize;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{AccountType, ItemType};
use crate::services::journal_service;
use crate::services::reconciliation::{inventory_balance_minor, replayed_balance_minor};
use crate::store::DocumentStore;

#[derive(Debug, Serialize)]
pub struct PnlRow {
    pub account_code: String,
    pub account_name: String,
    pub amount_minor: i64,
}

#[derive(Debug, Serialize)]
pub struct ProfitAndLoss {
    pub revenue: Vec<PnlRow>,
    pub expenses: Vec<PnlRow>,
    pub total_revenue_minor: i64,
    pub total_expenses_minor: i64,
    pub net_income_minor: i64,
}

/// Profit and loss derived by replaying the journal over revenue and expense
/// accounts
pub async fn profit_and_loss(store: &dyn DocumentStore) -> LedgerResult<ProfitAndLoss> {
    let accounts = store.list_accounts().await?;
    let entries = journal_service::list_entries(store).await?;

    let mut report = ProfitAndLoss {
        revenue: Vec::new(),
        expenses: Vec::new(),
        total_revenue_minor: 0,
        total_expenses_minor: 0,
        net_income_minor: 0,
    };

    for account in &accounts {
        let amount_minor = replayed_balance_minor(account, &entries);
        let row = PnlRow {
            account_code: account.code.clone(),
            account_name: account.name.clone(),
            amount_minor,
        };
        match account.account_type {
            AccountType::Revenue => {
                report.total_revenue_minor += amount_minor;
                report.revenue.push(row);
            }
            AccountType::Expense => {
                report.total_expenses_minor += amount_minor;
                report.expenses.push(row);
            }
            _ => {}
        }
    }

    report.net_income_minor = report.total_revenue_minor - report.total_expenses_minor;
    Ok(report)
}

#[derive(Debug, Serialize)]
pub struct InventoryValuation {
    pub raw_minor: i64,
    pub wip_minor: i64,
    pub finished_minor: i64,
    pub total_minor: i64,
    pub item_count: usize,
}

/// Stock valuation grouped by item type
pub async fn inventory_valuation(store: &dyn DocumentStore) -> LedgerResult<InventoryValuation> {
    let items = store.list_inventory_items().await?;
    let raw_minor = inventory_balance_minor(&items, ItemType::Raw);
    let wip_minor = inventory_balance_minor(&items, ItemType::Wip);
    let finished_minor = inventory_balance_minor(&items, ItemType::Finished);
    Ok(InventoryValuation {
        raw_minor,
        wip_minor,
        finished_minor,
        total_minor: raw_minor + wip_minor + finished_minor,
        item_count: items.len(),
    })
}

#[derive(Debug, Serialize)]
pub struct JobProfitability {
    pub work_order_id: String,
    pub revenue_minor: i64,
    pub material_cost_minor: i64,
    pub labor_cost_minor: i64,
    pub overhead_cost_minor: i64,
    pub total_cost_minor: i64,
    pub margin_minor: i64,
}

/// Revenue from linked invoices minus the rolled-up job cost
pub async fn job_profitability(
    store: &dyn DocumentStore,
    work_order_id: &str,
) -> LedgerResult<JobProfitability> {
    let work_order = store
        .get_work_order(work_order_id)
        .await?
        .ok_or_else(|| LedgerError::not_found("work order", work_order_id))?;

    let invoices = store.list_invoices().await?;
    let revenue_minor: i64 = invoices
        .iter()
        .filter(|inv| {
            inv.work_order_id.as_deref() == Some(work_order_id)
                || (inv.order_id.is_some() && inv.order_id == work_order.sales_order_id)
        })
        .map(|inv| inv.total_minor)
        .sum();

    let total_cost_minor = work_order.total_cost_minor();

    Ok(JobProfitability {
        work_order_id: work_order_id.to_string(),
        revenue_minor,
        material_cost_minor: work_order.material_cost_minor(),
        labor_cost_minor: work_order.labor_cost_minor,
        overhead_cost_minor: work_order.overhead_cost_minor,
        total_cost_minor,
        margin_minor: revenue_minor - total_cost_minor,
    })
}
