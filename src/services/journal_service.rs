//! Journal log service
//!
//! Owns appends to the journal collection. Every entry is validated for shape,
//! balance, and account existence before it is persisted; after that it is
//! immutable. Corrections are made with offsetting entries, never by mutating
//! history.

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{JournalEntry, JournalLine};
use crate::store::DocumentStore;
use crate::validation::validate_entry_lines;

/// Candidate journal entry, before an id is assigned
#[derive(Debug, Clone)]
pub struct NewJournalEntry {
    pub effective_date: NaiveDate,
    pub linked_doc: Option<String>,
    pub lines: Vec<JournalLine>,
}

impl NewJournalEntry {
    pub fn new(lines: Vec<JournalLine>, linked_doc: Option<String>) -> Self {
        Self {
            effective_date: Utc::now().date_naive(),
            linked_doc,
            lines,
        }
    }
}

/// Validate and append a journal entry, returning the persisted record
///
/// Rejects unbalanced entries ([`LedgerError::Imbalance`]) and entries that
/// reference an unknown account ([`LedgerError::Validation`]). The append and
/// any subsequent balance reconciliation are independent writes; a crash in
/// between leaves balances stale until the next reconciliation pass.
pub async fn append_entry(
    store: &dyn DocumentStore,
    candidate: NewJournalEntry,
) -> LedgerResult<JournalEntry> {
    validate_entry_lines(&candidate.lines)?;

    // Defensive account-existence check. Recorders only reference seeded
    // accounts, but entries may also arrive through the manual surface.
    for line in &candidate.lines {
        if store.get_account(&line.account_code).await?.is_none() {
            return Err(LedgerError::validation(format!(
                "journal line references unknown account '{}'",
                line.account_code
            )));
        }
    }

    let entry = JournalEntry {
        id: Uuid::new_v4(),
        effective_date: candidate.effective_date,
        created_at: Utc::now(),
        linked_doc: candidate.linked_doc,
        lines: candidate.lines,
    };

    store.append_journal_entry(&entry).await?;

    tracing::info!(
        entry_id = %entry.id,
        linked_doc = entry.linked_doc.as_deref().unwrap_or("-"),
        total_minor = entry.total_debits_minor(),
        "Journal entry appended"
    );

    Ok(entry)
}

/// Decode all journal entries, skipping malformed documents
///
/// The journal collection can contain documents written by older clients that
/// no longer decode (missing `lines`, wrong field types). A malformed entry is
/// logged and skipped so it cannot corrupt reconciliation of unrelated
/// accounts.
pub async fn list_entries(store: &dyn DocumentStore) -> LedgerResult<Vec<JournalEntry>> {
    let docs = store.list_journal_raw().await?;
    let mut entries = Vec::with_capacity(docs.len());
    for doc in docs {
        match serde_json::from_value::<JournalEntry>(doc) {
            Ok(entry) => entries.push(entry),
            Err(err) => {
                tracing::warn!(error = %err, "Skipping malformed journal document");
            }
        }
    }
    Ok(entries)
}

/// All well-formed entries linked to a given source document
pub async fn list_by_linked_doc(
    store: &dyn DocumentStore,
    linked_doc: &str,
) -> LedgerResult<Vec<JournalEntry>> {
    let entries = list_entries(store).await?;
    Ok(entries
        .into_iter()
        .filter(|e| e.linked_doc.as_deref() == Some(linked_doc))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coa;
    use crate::store::MemoryStore;

    async fn seeded() -> MemoryStore {
        let store = MemoryStore::new();
        coa::seed_chart(&store).await.unwrap();
        store
    }

    #[tokio::test]
    async fn append_assigns_id_and_persists() {
        let store = seeded().await;
        let entry = append_entry(
            &store,
            NewJournalEntry::new(
                vec![
                    JournalLine::debit(coa::CASH, 5_000, "test"),
                    JournalLine::credit(coa::SHORT_TERM_DEBT, 5_000, "test"),
                ],
                Some("loan-1".into()),
            ),
        )
        .await
        .unwrap();

        let listed = list_entries(&store).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, entry.id);
    }

    #[tokio::test]
    async fn unbalanced_entry_rejected() {
        let store = seeded().await;
        let result = append_entry(
            &store,
            NewJournalEntry::new(
                vec![
                    JournalLine::debit(coa::CASH, 5_000, "test"),
                    JournalLine::credit(coa::SHORT_TERM_DEBT, 4_999, "test"),
                ],
                None,
            ),
        )
        .await;
        assert!(matches!(result, Err(LedgerError::Imbalance { .. })));
        assert!(list_entries(&store).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_account_rejected() {
        let store = seeded().await;
        let result = append_entry(
            &store,
            NewJournalEntry::new(
                vec![
                    JournalLine::debit("NO_SUCH_ACCOUNT", 5_000, "test"),
                    JournalLine::credit(coa::CASH, 5_000, "test"),
                ],
                None,
            ),
        )
        .await;
        assert!(matches!(result, Err(LedgerError::Validation(_))));
    }

    #[tokio::test]
    async fn malformed_documents_are_skipped() {
        let store = seeded().await;
        store
            .append_journal_raw(serde_json::json!({"id": "not-a-uuid"}))
            .await
            .unwrap();
        append_entry(
            &store,
            NewJournalEntry::new(
                vec![
                    JournalLine::debit(coa::CASH, 100, "test"),
                    JournalLine::credit(coa::SALES_REVENUE, 100, "test"),
                ],
                None,
            ),
        )
        .await
        .unwrap();

        let entries = list_entries(&store).await.unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[tokio::test]
    async fn linked_doc_filter() {
        let store = seeded().await;
        for doc in ["inv-1", "inv-2", "inv-1"] {
            append_entry(
                &store,
                NewJournalEntry::new(
                    vec![
                        JournalLine::debit(coa::ACCOUNTS_RECEIVABLE, 100, "test"),
                        JournalLine::credit(coa::SALES_REVENUE, 100, "test"),
                    ],
                    Some(doc.into()),
                ),
            )
            .await
            .unwrap();
        }
        assert_eq!(list_by_linked_doc(&store, "inv-1").await.unwrap().len(), 2);
        assert_eq!(list_by_linked_doc(&store, "inv-2").await.unwrap().len(), 1);
        assert_eq!(list_by_linked_doc(&store, "inv-3").await.unwrap().len(), 0);
    }
}
