//! # Domain
//!
//! Period calendar, ledger engine and the services that apply them to the
//! persisted dataset. Everything here is synchronous.

pub mod commands;
pub mod entry_service;
pub mod errors;
pub mod kid_service;
pub mod ledger;
pub mod models;
pub mod period_calendar;
pub mod settings_service;

pub use entry_service::EntryService;
pub use errors::{LedgerError, LedgerResult};
pub use kid_service::KidService;
pub use ledger::LedgerEngine;
pub use period_calendar::{Direction, Period, PeriodCalendar, PeriodKey, PeriodType};
pub use settings_service::SettingsService;
