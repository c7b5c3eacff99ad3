//! Batch maintenance jobs triggered by the cron surface
//!
//! Batches process items sequentially and never abort on a single failure;
//! per-item errors are accumulated into the summary.

use serde::Serialize;

use crate::error::LedgerResult;
use crate::services::reconciliation;
use crate::store::DocumentStore;

/// Uniform result shape for batch endpoints
#[derive(Debug, Default, Serialize)]
pub struct BatchSummary {
    pub updated: usize,
    pub failed: usize,
    pub skipped: usize,
    pub errors: Vec<String>,
}

/// Repair the design cost invariant: total == material + labor + overhead
///
/// Designs already satisfying the invariant are counted as skipped.
pub async fn fix_design_costs(store: &dyn DocumentStore) -> LedgerResult<BatchSummary> {
    let designs = store.list_designs().await?;
    let mut summary = BatchSummary::default();

    for mut design in designs {
        let expected = design.component_sum_minor();
        if design.total_cost_minor == expected {
            summary.skipped += 1;
            continue;
        }
        let design_id = design.id.clone();
        design.total_cost_minor = expected;
        match store.put_design(design).await {
            Ok(()) => {
                tracing::info!(design_id = %design_id, total_cost_minor = expected, "Repaired design cost");
                summary.updated += 1;
            }
            Err(err) => {
                summary.failed += 1;
                summary.errors.push(format!("{design_id}: {err}"));
            }
        }
    }

    Ok(summary)
}

/// Reconcile every account in the chart, continuing past failures
pub async fn sync_all_balances(store: &dyn DocumentStore) -> LedgerResult<BatchSummary> {
    let accounts = store.list_accounts().await?;
    let codes: Vec<String> = accounts.into_iter().map(|a| a.code).collect();
    let outcome = reconciliation::reconcile_all(store, &codes).await?;
    Ok(BatchSummary {
        updated: outcome.updated,
        failed: outcome.failed,
        skipped: 0,
        errors: outcome.errors,
    })
}
