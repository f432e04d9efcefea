//! Error kinds raised by the ledger engine and its services.
//!
//! All of them are recoverable and carry a message describing the violated
//! constraint, so a UI can show them to the user as-is.

use thiserror::Error;

use crate::domain::period_calendar::PeriodKey;

#[derive(Debug, Error)]
pub enum LedgerError {
    /// Amount, percentage split, withdrawal or name failed validation
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Withdrawal exceeds the saved balance available at the entry's period
    #[error("Cannot use {requested:.2} from saved at {period}: only {available:.2} available")]
    Overdraw {
        period: PeriodKey,
        requested: f64,
        available: f64,
    },

    /// An entry for this period key already exists for the kid
    #[error("An entry for period {0} already exists")]
    DuplicatePeriod(PeriodKey),

    /// Another entry already owns the period key an update retargets to
    #[error("Period {period} is already used by entry {owner_id}")]
    PeriodConflict { period: PeriodKey, owner_id: String },

    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("Malformed period key: '{0}'")]
    MalformedKey(String),

    /// The repository failed to load or save the dataset
    #[error("Storage error: {0:#}")]
    Storage(#[from] anyhow::Error),
}

impl LedgerError {
    pub fn validation(message: impl Into<String>) -> Self {
        LedgerError::Validation(message.into())
    }

    pub fn kid_not_found(kid_id: &str) -> Self {
        LedgerError::NotFound {
            kind: "Kid",
            id: kid_id.to_string(),
        }
    }

    pub fn entry_not_found(entry_id: &str) -> Self {
        LedgerError::NotFound {
            kind: "Entry",
            id: entry_id.to_string(),
        }
    }
}

pub type LedgerResult<T> = std::result::Result<T, LedgerError>;
