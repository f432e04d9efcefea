//! backend/src/mappers/totals_mapper.rs

use shared::{LedgerRowResponse, TotalsResponse};

use crate::domain::models::{LedgerRow, Totals};
use crate::mappers::EntryMapper;

/// Mapper from computed totals to the presentation DTOs.
pub struct TotalsMapper;

impl TotalsMapper {
    pub fn to_dto(totals: &Totals) -> TotalsResponse {
        TotalsResponse {
            total_spent: totals.total_spent,
            total_saved: totals.total_saved,
            total_given: totals.total_given,
            total_interest: totals.total_interest,
            total_used_from_saved: totals.total_used_from_saved,
            grand_total: totals.grand_total,
            entries: totals.entries.iter().map(Self::row_to_dto).collect(),
        }
    }

    fn row_to_dto(row: &LedgerRow) -> LedgerRowResponse {
        LedgerRowResponse {
            entry: EntryMapper::to_record(&row.entry),
            interest_earned: row.interest_earned,
            running_saved: row.running_saved,
        }
    }
}
