//! backend/src/mappers/entry_mapper.rs

use chrono::{DateTime, NaiveDateTime};
use shared::EntryRecord;

use crate::domain::errors::{LedgerError, LedgerResult};
use crate::domain::models::Entry;
use crate::domain::period_calendar::PeriodKey;

/// Local naive ISO-8601, fraction only when non-zero
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Mapper to convert between persisted entry records and domain entries.
pub struct EntryMapper;

impl EntryMapper {
    /// Converts a persisted record to a domain entry, validating its period key.
    pub fn to_domain(record: EntryRecord) -> LedgerResult<Entry> {
        let period: PeriodKey = record.period.parse()?;
        let created_at = Self::parse_timestamp(&record.id, "createdAt", &record.created_at)?;
        let updated_at = record
            .updated_at
            .as_deref()
            .map(|value| Self::parse_timestamp(&record.id, "updatedAt", value))
            .transpose()?;

        Ok(Entry {
            id: record.id,
            period,
            period_type: record.period_type,
            amount: record.amount,
            spent_percent: record.spent_percent,
            saved_percent: record.saved_percent,
            given_percent: record.given_percent,
            spent: record.spent,
            saved: record.saved,
            given: record.given,
            used_from_saved: record.used_from_saved,
            interest_rate: record.interest_rate,
            created_at,
            updated_at,
        })
    }

    /// Converts a domain entry to its persisted record.
    pub fn to_record(entry: &Entry) -> EntryRecord {
        EntryRecord {
            id: entry.id.clone(),
            period: entry.period.to_string(),
            period_type: entry.period_type,
            amount: entry.amount,
            spent_percent: entry.spent_percent,
            saved_percent: entry.saved_percent,
            given_percent: entry.given_percent,
            spent: entry.spent,
            saved: entry.saved,
            given: entry.given,
            used_from_saved: entry.used_from_saved,
            interest_rate: entry.interest_rate,
            created_at: Self::format_timestamp(&entry.created_at),
            updated_at: entry.updated_at.as_ref().map(Self::format_timestamp),
        }
    }

    pub fn format_timestamp(timestamp: &NaiveDateTime) -> String {
        timestamp.format(TIMESTAMP_FORMAT).to_string()
    }

    /// Accepts naive ISO-8601 with optional fraction, or RFC 3339 with an offset
    fn parse_timestamp(entry_id: &str, field: &str, value: &str) -> LedgerResult<NaiveDateTime> {
        NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
            .or_else(|_| DateTime::parse_from_rfc3339(value).map(|dt| dt.naive_local()))
            .map_err(|_| {
                LedgerError::validation(format!(
                    "Entry {} has an invalid {} timestamp '{}'",
                    entry_id, field, value
                ))
            })
    }
}
