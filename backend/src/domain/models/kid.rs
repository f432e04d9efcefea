//! Domain model for a kid and their default allocation.
use uuid::Uuid;

use crate::domain::models::entry::Entry;
use crate::domain::period_calendar::PeriodKey;

/// Default spent/saved/given percentages applied to new deposits
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Allocation {
    pub spent: f64,
    pub saved: f64,
    pub given: f64,
}

impl Allocation {
    pub fn new(spent: f64, saved: f64, given: f64) -> Self {
        Self { spent, saved, given }
    }

    pub fn total(&self) -> f64 {
        self.spent + self.saved + self.given
    }
}

impl Default for Allocation {
    fn default() -> Self {
        Self::new(40.0, 40.0, 20.0)
    }
}

/// A kid with their entries in insertion order.
/// At most one entry exists per period key.
#[derive(Debug, Clone, PartialEq)]
pub struct Kid {
    pub id: String,
    pub name: String,
    pub allocation: Allocation,
    /// Default interest rate in percent for new entries
    pub interest_rate: f64,
    pub entries: Vec<Entry>,
}

impl Kid {
    /// Create a kid with the default 40/40/20 allocation and no interest
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Self::generate_id(),
            name: name.into(),
            allocation: Allocation::default(),
            interest_rate: 0.0,
            entries: Vec::new(),
        }
    }

    /// Generate a unique kid ID, e.g. `kid_0b7e41f2c9aa`
    pub fn generate_id() -> String {
        let hex = Uuid::new_v4().simple().to_string();
        format!("kid_{}", &hex[..12])
    }

    pub fn entry(&self, entry_id: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == entry_id)
    }

    pub fn entry_for_period(&self, period: &PeriodKey) -> Option<&Entry> {
        self.entries.iter().find(|e| &e.period == period)
    }
}
