//! Kid-level access to the whole-dataset repository.
//!
//! Every mutation follows the same cycle: load the dataset, map the target
//! kid to the domain, apply the change, map it back and save. The dataset is
//! only saved when the change succeeds.

use log::debug;
use shared::{Dataset, KidRecord, SettingsRecord};
use std::sync::Arc;

use crate::domain::errors::{LedgerError, LedgerResult};
use crate::domain::models::Kid;
use crate::mappers::KidMapper;
use crate::storage::traits::Repository;

#[derive(Clone)]
pub struct KidStore {
    repository: Arc<dyn Repository>,
}

impl KidStore {
    pub fn new(repository: Arc<dyn Repository>) -> Self {
        Self { repository }
    }

    fn load(&self) -> LedgerResult<Dataset> {
        Ok(self.repository.load()?)
    }

    fn save(&self, dataset: &Dataset) -> LedgerResult<()> {
        Ok(self.repository.save(dataset)?)
    }

    fn position(dataset: &Dataset, kid_id: &str) -> LedgerResult<usize> {
        dataset
            .kids
            .iter()
            .position(|k| k.id == kid_id)
            .ok_or_else(|| LedgerError::kid_not_found(kid_id))
    }

    pub fn get_kid(&self, kid_id: &str) -> LedgerResult<Kid> {
        let dataset = self.load()?;
        let index = Self::position(&dataset, kid_id)?;
        KidMapper::to_domain(dataset.kids[index].clone())
    }

    /// All kids in insertion order
    pub fn list_kids(&self) -> LedgerResult<Vec<Kid>> {
        self.load()?
            .kids
            .into_iter()
            .map(KidMapper::to_domain)
            .collect()
    }

    pub fn insert_kid(&self, kid: &Kid) -> LedgerResult<()> {
        let mut dataset = self.load()?;
        dataset.kids.push(KidMapper::to_record(kid));
        self.save(&dataset)
    }

    /// Remove a kid and all of their entries, returning the removed record.
    /// Entries are not parsed, so a kid with unreadable data can still go.
    pub fn remove_kid(&self, kid_id: &str) -> LedgerResult<KidRecord> {
        let mut dataset = self.load()?;
        let index = Self::position(&dataset, kid_id)?;
        let record = dataset.kids.remove(index);
        self.save(&dataset)?;
        Ok(record)
    }

    /// Apply `change` to one kid and persist the result. Nothing is saved
    /// when `change` fails.
    pub fn modify_kid<T>(
        &self,
        kid_id: &str,
        change: impl FnOnce(&mut Kid) -> LedgerResult<T>,
    ) -> LedgerResult<T> {
        let mut dataset = self.load()?;
        let index = Self::position(&dataset, kid_id)?;
        let mut kid = KidMapper::to_domain(dataset.kids[index].clone())?;

        let result = change(&mut kid)?;

        dataset.kids[index] = KidMapper::to_record(&kid);
        self.save(&dataset)?;
        debug!("Persisted changes to kid {}", kid_id);
        Ok(result)
    }

    pub fn settings(&self) -> LedgerResult<SettingsRecord> {
        Ok(self.load()?.settings)
    }

    pub fn replace_settings(&self, settings: SettingsRecord) -> LedgerResult<SettingsRecord> {
        let mut dataset = self.load()?;
        dataset.settings = settings;
        self.save(&dataset)?;
        Ok(dataset.settings)
    }
}
