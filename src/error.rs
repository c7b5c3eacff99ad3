//! Error taxonomy shared across services and routes

use thiserror::Error;

use crate::store::StoreError;
use crate::validation::ValidationError;

/// Errors surfaced by ledger services
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("journal entry is unbalanced: debits {debit_minor} != credits {credit_minor}")]
    Imbalance { debit_minor: i64, credit_minor: i64 },

    #[error("document store error: {0}")]
    Store(#[from] StoreError),
}

pub type LedgerResult<T> = Result<T, LedgerError>;

impl LedgerError {
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

impl From<ValidationError> for LedgerError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::Unbalanced {
                debit_minor,
                credit_minor,
            } => Self::Imbalance {
                debit_minor,
                credit_minor,
            },
            other => Self::Validation(other.to_string()),
        }
    }
}
