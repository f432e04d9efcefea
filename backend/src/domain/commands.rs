//! Domain-level command and query types.
//!
//! Collaborators build these and hand them to the services; the services
//! resolve defaults, look up the kid and delegate to the ledger engine.

pub mod kids {
    use crate::domain::models::{Allocation, Kid, Totals};

    /// Input for creating a new kid
    #[derive(Debug, Clone)]
    pub struct CreateKidCommand {
        pub name: String,
    }

    /// Input for renaming a kid
    #[derive(Debug, Clone)]
    pub struct RenameKidCommand {
        pub kid_id: String,
        pub name: String,
    }

    #[derive(Debug, Clone)]
    pub struct DeleteKidCommand {
        pub kid_id: String,
    }

    /// New default allocation and interest rate for a kid
    #[derive(Debug, Clone)]
    pub struct UpdateAllocationCommand {
        pub kid_id: String,
        pub allocation: Allocation,
        pub interest_rate: f64,
    }

    /// A kid together with their computed totals
    #[derive(Debug, Clone)]
    pub struct KidWithTotals {
        pub kid: Kid,
        pub totals: Totals,
    }
}

pub mod entries {
    use crate::domain::ledger::EntryUpdate;
    use crate::domain::models::Allocation;
    use crate::domain::period_calendar::{PeriodKey, PeriodType};

    /// Input for adding an entry. Missing allocation or interest rate fall
    /// back to the kid's defaults.
    #[derive(Debug, Clone)]
    pub struct AddEntryCommand {
        pub kid_id: String,
        pub period: PeriodKey,
        pub period_type: PeriodType,
        pub amount: f64,
        pub used_from_saved: f64,
        pub allocation: Option<Allocation>,
        pub interest_rate: Option<f64>,
    }

    #[derive(Debug, Clone)]
    pub struct UpdateEntryCommand {
        pub kid_id: String,
        pub entry_id: String,
        pub update: EntryUpdate,
    }

    #[derive(Debug, Clone)]
    pub struct DeleteEntryCommand {
        pub kid_id: String,
        pub entry_id: String,
    }

    /// Query for the withdrawal ceiling of an existing entry
    #[derive(Debug, Clone)]
    pub struct AvailableSavedQuery {
        pub kid_id: String,
        pub entry_id: String,
    }
}

pub mod settings {
    use crate::domain::period_calendar::PeriodType;

    /// Fields left as `None` keep their current value
    #[derive(Debug, Clone, Default)]
    pub struct UpdateSettingsCommand {
        pub period: Option<PeriodType>,
        pub currency: Option<String>,
    }
}
