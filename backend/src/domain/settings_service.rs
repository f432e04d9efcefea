use log::info;
use shared::SettingsRecord;
use std::sync::Arc;

use crate::domain::commands::settings::UpdateSettingsCommand;
use crate::domain::errors::{LedgerError, LedgerResult};
use crate::domain::period_calendar::{Period, PeriodCalendar};
use crate::storage::{KidStore, Repository};

/// Service for the application-wide period granularity and currency
#[derive(Clone)]
pub struct SettingsService {
    store: KidStore,
    calendar: PeriodCalendar,
}

impl SettingsService {
    pub fn new(repository: Arc<dyn Repository>) -> Self {
        Self {
            store: KidStore::new(repository),
            calendar: PeriodCalendar::new(),
        }
    }

    pub fn get_settings(&self) -> LedgerResult<SettingsRecord> {
        self.store.settings()
    }

    pub fn update_settings(&self, command: UpdateSettingsCommand) -> LedgerResult<SettingsRecord> {
        let mut settings = self.store.settings()?;

        if let Some(period) = command.period {
            settings.period = period;
        }
        if let Some(currency) = command.currency {
            let currency = currency.trim();
            if currency.is_empty() {
                return Err(LedgerError::validation("Currency cannot be empty"));
            }
            settings.currency = currency.to_string();
        }

        info!(
            "Updating settings: period={}, currency={}",
            settings.period, settings.currency
        );
        self.store.replace_settings(settings)
    }

    /// Today's period at the configured granularity
    pub fn current_period(&self) -> LedgerResult<Period> {
        let settings = self.store.settings()?;
        Ok(self.calendar.current_period(settings.period))
    }
}
