//! Derived per-kid totals. Never stored; recomputed from entries on demand.
use crate::domain::models::entry::Entry;

/// An entry annotated with the state of the fold after processing it
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerRow {
    pub entry: Entry,
    pub interest_earned: f64,
    pub running_saved: f64,
}

/// Aggregate figures for one kid, each rounded to cents independently
#[derive(Debug, Clone, PartialEq)]
pub struct Totals {
    /// Spend bucket plus everything withdrawn from savings
    pub total_spent: f64,
    /// Final running saved balance
    pub total_saved: f64,
    pub total_given: f64,
    pub total_interest: f64,
    pub total_used_from_saved: f64,
    pub grand_total: f64,
    /// Entries in ascending period key order
    pub entries: Vec<LedgerRow>,
}
