//! Validation logic for candidate journal entries
//!
//! Checks the shape of an entry before it reaches the journal log. Account
//! existence is checked separately by the journal service, which has store
//! access.

use thiserror::Error;

use crate::models::JournalLine;

/// Validation errors for candidate journal entries
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Lines must have at least 2 items, got {0}")]
    InsufficientLines(usize),

    #[error("Line {0}: account code cannot be empty")]
    EmptyAccountCode(usize),

    #[error("Line {0}: debit must be non-negative, got {1}")]
    NegativeDebit(usize, i64),

    #[error("Line {0}: credit must be non-negative, got {1}")]
    NegativeCredit(usize, i64),

    #[error("Total debits ({debit_minor}) must equal total credits ({credit_minor})")]
    Unbalanced { debit_minor: i64, credit_minor: i64 },
}

/// Validate the lines of a candidate journal entry
///
/// # Validation Rules
///
/// - At least 2 lines (a balanced entry needs a debit side and a credit side)
/// - Each line: non-empty account code, non-negative debit and credit
/// - Total debits must equal total credits exactly (minor units, no epsilon)
pub fn validate_entry_lines(lines: &[JournalLine]) -> Result<(), ValidationError> {
    if lines.len() < 2 {
        return Err(ValidationError::InsufficientLines(lines.len()));
    }

    let mut total_debits = 0i64;
    let mut total_credits = 0i64;

    for (idx, line) in lines.iter().enumerate() {
        if line.account_code.is_empty() {
            return Err(ValidationError::EmptyAccountCode(idx));
        }
        if line.debit_minor < 0 {
            return Err(ValidationError::NegativeDebit(idx, line.debit_minor));
        }
        if line.credit_minor < 0 {
            return Err(ValidationError::NegativeCredit(idx, line.credit_minor));
        }
        total_debits += line.debit_minor;
        total_credits += line.credit_minor;
    }

    if total_debits != total_credits {
        return Err(ValidationError::Unbalanced {
            debit_minor: total_debits,
            credit_minor: total_credits,
        });
    }

    Ok(())
}
