//! Domain model for a single pocket money entry.
use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::domain::period_calendar::{PeriodKey, PeriodType};

/// One deposit for one period, split into spend/save/give buckets
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub id: String,
    pub period: PeriodKey,
    pub period_type: PeriodType,
    pub amount: f64,
    pub spent_percent: f64,
    pub saved_percent: f64,
    pub given_percent: f64,
    /// Derived currency amounts, rounded to cents
    pub spent: f64,
    pub saved: f64,
    pub given: f64,
    /// Withdrawal from the running saved balance booked at this period
    pub used_from_saved: f64,
    /// Interest rate in percent applied to the balance carried into this period
    pub interest_rate: f64,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

impl Entry {
    /// Generate a unique entry ID, e.g. `entry_3f2a9c0d81be`
    pub fn generate_id() -> String {
        let hex = Uuid::new_v4().simple().to_string();
        format!("entry_{}", &hex[..12])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id_format() {
        let id = Entry::generate_id();
        assert!(id.starts_with("entry_"));
        assert_eq!(id.len(), "entry_".len() + 12);
        assert!(id["entry_".len()..].chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(Entry::generate_id(), id);
    }
}
