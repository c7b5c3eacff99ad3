//! Journal log read endpoint

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::models::JournalEntry;
use crate::routes::{ApiError, AppState};
use crate::services::journal_service;

#[derive(Debug, Deserialize)]
pub struct JournalQuery {
    /// Optional source-document filter
    pub linked_doc: Option<String>,
}

/// Handler for GET /api/journal
pub async fn list_entries(
    State(state): State<AppState>,
    Query(query): Query<JournalQuery>,
) -> Result<Json<Vec<JournalEntry>>, ApiError> {
    let entries = match query.linked_doc {
        Some(linked_doc) => {
            journal_service::list_by_linked_doc(state.store.as_ref(), &linked_doc).await?
        }
        None => journal_service::list_entries(state.store.as_ref()).await?,
    };
    Ok(Json(entries))
}
