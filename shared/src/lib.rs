//! Plain records shared between the ledger engine and its collaborators.
//!
//! Everything in this crate is data only: the persisted dataset exchanged
//! verbatim with a repository, and the computed totals handed to whatever
//! presents them. Field names serialize in camelCase to match the on-disk
//! `data.json` layout.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Granularity of a pocket-money period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PeriodType {
    Weekly,
    Biweekly,
    #[default]
    Monthly,
    Quarterly,
}

impl PeriodType {
    pub const ALL: [PeriodType; 4] = [
        PeriodType::Weekly,
        PeriodType::Biweekly,
        PeriodType::Monthly,
        PeriodType::Quarterly,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodType::Weekly => "weekly",
            PeriodType::Biweekly => "biweekly",
            PeriodType::Monthly => "monthly",
            PeriodType::Quarterly => "quarterly",
        }
    }
}

impl fmt::Display for PeriodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Default spent/saved/given split, in percent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationRecord {
    pub spent: f64,
    pub saved: f64,
    pub given: f64,
}

impl Default for AllocationRecord {
    fn default() -> Self {
        Self {
            spent: 40.0,
            saved: 40.0,
            given: 20.0,
        }
    }
}

/// One deposit for one period, as persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryRecord {
    pub id: String,
    /// Canonical period key, e.g. `2024-W05`, `2024-BW03`, `2024-Q1`, `2024-02`
    pub period: String,
    pub period_type: PeriodType,
    pub amount: f64,
    pub spent_percent: f64,
    pub saved_percent: f64,
    pub given_percent: f64,
    pub spent: f64,
    pub saved: f64,
    pub given: f64,
    #[serde(default)]
    pub used_from_saved: f64,
    #[serde(default)]
    pub interest_rate: f64,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// A kid and all of their entries, as persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KidRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub allocation: AllocationRecord,
    #[serde(default)]
    pub interest_rate: f64,
    #[serde(default)]
    pub entries: Vec<EntryRecord>,
}

/// Application-wide settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsRecord {
    pub period: PeriodType,
    pub currency: String,
}

impl Default for SettingsRecord {
    fn default() -> Self {
        Self {
            period: PeriodType::Monthly,
            currency: "EUR".to_string(),
        }
    }
}

/// The whole persisted state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Dataset {
    #[serde(default)]
    pub kids: Vec<KidRecord>,
    #[serde(default)]
    pub settings: SettingsRecord,
}

/// An entry annotated with the values produced by the chronological fold.
/// Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerRowResponse {
    #[serde(flatten)]
    pub entry: EntryRecord,
    pub interest_earned: f64,
    pub running_saved: f64,
}

/// Aggregate totals for one kid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalsResponse {
    /// Spend bucket plus withdrawals from savings
    pub total_spent: f64,
    pub total_saved: f64,
    pub total_given: f64,
    pub total_interest: f64,
    pub total_used_from_saved: f64,
    pub grand_total: f64,
    pub entries: Vec<LedgerRowResponse>,
}

/// A kid's settings together with their computed totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KidSummaryResponse {
    pub id: String,
    pub name: String,
    pub allocation: AllocationRecord,
    pub interest_rate: f64,
    pub totals: TotalsResponse,
}
