//! Strongly typed domain models for the pocket money ledger.
//!
//! These differ from the persisted records in the `shared` crate in that
//! period keys are parsed and validated, and timestamps are real date-times.
//! Conversion between the two lives in `crate::mappers`.

pub mod entry;
pub mod kid;
pub mod totals;

pub use entry::Entry;
pub use kid::{Allocation, Kid};
pub use totals::{LedgerRow, Totals};
