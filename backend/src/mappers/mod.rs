//! Conversions between the plain records of the `shared` crate and the
//! strongly typed domain models.
//!
//! Loading is the parse boundary: a malformed period key or timestamp in a
//! persisted record is rejected here instead of reaching the engine.

pub mod entry_mapper;
pub mod kid_mapper;
pub mod totals_mapper;

pub use entry_mapper::EntryMapper;
pub use kid_mapper::KidMapper;
pub use totals_mapper::TotalsMapper;
