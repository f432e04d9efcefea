//! Pocket money backend: period calendar, ledger engine, JSON storage and
//! the services tying them together.

pub mod config;
pub mod domain;
pub mod mappers;
pub mod storage;

use anyhow::Result;
use log::info;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::domain::{EntryService, KidService, PeriodCalendar, SettingsService};
use crate::storage::{JsonFileRepository, Repository};

/// All services sharing one repository
#[derive(Clone)]
pub struct Backend {
    pub kid_service: KidService,
    pub entry_service: EntryService,
    pub settings_service: SettingsService,
    pub calendar: PeriodCalendar,
}

impl Backend {
    pub fn new(repository: Arc<dyn Repository>) -> Self {
        Self {
            kid_service: KidService::new(repository.clone()),
            entry_service: EntryService::new(repository.clone()),
            settings_service: SettingsService::new(repository),
            calendar: PeriodCalendar::new(),
        }
    }

    /// Open the JSON data file named by the configuration
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let path = config.data_file_path();
        info!("Opening data file {:?}", path);
        let repository = JsonFileRepository::open(path)?;
        Ok(Self::new(Arc::new(repository)))
    }
}
