//! In-memory repository, used by tests and as a scratch store.

use anyhow::{anyhow, Result};
use log::debug;
use shared::Dataset;
use std::sync::Mutex;

use crate::storage::traits::Repository;

#[derive(Debug, Default)]
pub struct MemoryRepository {
    dataset: Mutex<Dataset>,
    saves: Mutex<usize>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dataset(dataset: Dataset) -> Self {
        Self {
            dataset: Mutex::new(dataset),
            saves: Mutex::new(0),
        }
    }

    /// Number of successful `save` calls so far
    pub fn save_count(&self) -> usize {
        self.saves.lock().map(|count| *count).unwrap_or(0)
    }
}

impl Repository for MemoryRepository {
    fn load(&self) -> Result<Dataset> {
        let dataset = self
            .dataset
            .lock()
            .map_err(|_| anyhow!("In-memory dataset lock poisoned"))?;
        Ok(dataset.clone())
    }

    fn save(&self, dataset: &Dataset) -> Result<()> {
        let mut current = self
            .dataset
            .lock()
            .map_err(|_| anyhow!("In-memory dataset lock poisoned"))?;
        *current = dataset.clone();
        if let Ok(mut count) = self.saves.lock() {
            *count += 1;
        }
        debug!("Saved in-memory dataset with {} kids", dataset.kids.len());
        Ok(())
    }
}
