//! Ledger business logic: journal log, reconciliation engine, transaction
//! recorders, cost rollup, reporting, and batch maintenance

pub mod cost_rollup;
pub mod journal_service;
pub mod maintenance;
pub mod reconciliation;
pub mod recorders;
pub mod reporting;
