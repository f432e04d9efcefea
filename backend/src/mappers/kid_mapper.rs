//! backend/src/mappers/kid_mapper.rs

use shared::{AllocationRecord, KidRecord, KidSummaryResponse};
use std::collections::HashSet;

use crate::domain::errors::{LedgerError, LedgerResult};
use crate::domain::models::{Allocation, Kid, Totals};
use crate::mappers::{EntryMapper, TotalsMapper};

/// Mapper to convert between persisted kid records and domain kids.
pub struct KidMapper;

impl KidMapper {
    /// Converts a persisted kid, rejecting malformed or duplicated period keys.
    pub fn to_domain(record: KidRecord) -> LedgerResult<Kid> {
        let entries = record
            .entries
            .into_iter()
            .map(EntryMapper::to_domain)
            .collect::<LedgerResult<Vec<_>>>()?;

        let mut seen = HashSet::new();
        for entry in &entries {
            if !seen.insert(&entry.period) {
                return Err(LedgerError::DuplicatePeriod(entry.period.clone()));
            }
        }

        Ok(Kid {
            id: record.id,
            name: record.name,
            allocation: Self::allocation_to_domain(&record.allocation),
            interest_rate: record.interest_rate,
            entries,
        })
    }

    /// Converts a domain kid to its persisted record.
    pub fn to_record(kid: &Kid) -> KidRecord {
        KidRecord {
            id: kid.id.clone(),
            name: kid.name.clone(),
            allocation: Self::allocation_to_record(&kid.allocation),
            interest_rate: kid.interest_rate,
            entries: kid.entries.iter().map(EntryMapper::to_record).collect(),
        }
    }

    pub fn to_summary_dto(kid: &Kid, totals: &Totals) -> KidSummaryResponse {
        KidSummaryResponse {
            id: kid.id.clone(),
            name: kid.name.clone(),
            allocation: Self::allocation_to_record(&kid.allocation),
            interest_rate: kid.interest_rate,
            totals: TotalsMapper::to_dto(totals),
        }
    }

    fn allocation_to_domain(record: &AllocationRecord) -> Allocation {
        Allocation::new(record.spent, record.saved, record.given)
    }

    fn allocation_to_record(allocation: &Allocation) -> AllocationRecord {
        AllocationRecord {
            spent: allocation.spent,
            saved: allocation.saved,
            given: allocation.given,
        }
    }
}
