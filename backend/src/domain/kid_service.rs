use log::{info, warn};
use std::sync::Arc;

use crate::domain::commands::kids::{
    CreateKidCommand, DeleteKidCommand, KidWithTotals, RenameKidCommand, UpdateAllocationCommand,
};
use crate::domain::errors::{LedgerError, LedgerResult};
use crate::domain::ledger::{validate_allocation, LedgerEngine};
use crate::domain::models::Kid;
use crate::storage::{KidStore, Repository};

/// Service for managing kids and their default allocation
#[derive(Clone)]
pub struct KidService {
    store: KidStore,
    engine: LedgerEngine,
}

impl KidService {
    pub fn new(repository: Arc<dyn Repository>) -> Self {
        Self {
            store: KidStore::new(repository),
            engine: LedgerEngine::new(),
        }
    }

    /// Create a kid with the default 40/40/20 allocation and no interest
    pub fn create_kid(&self, command: CreateKidCommand) -> LedgerResult<Kid> {
        info!("Creating kid: name={}", command.name);
        let name = Self::validate_name(&command.name)?;

        let kid = Kid::new(name);
        self.store.insert_kid(&kid)?;

        info!("Created kid: {} with ID: {}", kid.name, kid.id);
        Ok(kid)
    }

    pub fn rename_kid(&self, command: RenameKidCommand) -> LedgerResult<Kid> {
        info!("Renaming kid: {}", command.kid_id);
        let name = Self::validate_name(&command.name)?;

        self.store.modify_kid(&command.kid_id, |kid| {
            kid.name = name;
            Ok(kid.clone())
        })
    }

    /// Delete a kid together with all of their entries
    pub fn delete_kid(&self, command: DeleteKidCommand) -> LedgerResult<()> {
        info!("Deleting kid: {}", command.kid_id);
        let removed = self.store.remove_kid(&command.kid_id)?;
        info!(
            "Deleted kid {} ({}) and {} entries",
            removed.name,
            removed.id,
            removed.entries.len()
        );
        Ok(())
    }

    pub fn get_kid(&self, kid_id: &str) -> LedgerResult<KidWithTotals> {
        let kid = self.store.get_kid(kid_id).map_err(|e| {
            warn!("Failed to get kid {}: {}", kid_id, e);
            e
        })?;
        let totals = self.engine.compute_totals(&kid);
        Ok(KidWithTotals { kid, totals })
    }

    /// All kids in insertion order, each with their totals
    pub fn list_kids(&self) -> LedgerResult<Vec<KidWithTotals>> {
        let kids = self.store.list_kids()?;
        info!("Found {} kids", kids.len());
        Ok(kids
            .into_iter()
            .map(|kid| {
                let totals = self.engine.compute_totals(&kid);
                KidWithTotals { kid, totals }
            })
            .collect())
    }

    /// Replace the default allocation and interest rate. Existing entries
    /// keep the split they were recorded with.
    pub fn update_allocation(&self, command: UpdateAllocationCommand) -> LedgerResult<Kid> {
        info!(
            "Updating allocation for kid {}: {}/{}/{} at {}%",
            command.kid_id,
            command.allocation.spent,
            command.allocation.saved,
            command.allocation.given,
            command.interest_rate
        );
        validate_allocation(&command.allocation)?;
        if !command.interest_rate.is_finite() || command.interest_rate < 0.0 {
            return Err(LedgerError::validation("Interest rate cannot be negative"));
        }

        self.store.modify_kid(&command.kid_id, |kid| {
            kid.allocation = command.allocation;
            kid.interest_rate = command.interest_rate;
            Ok(kid.clone())
        })
    }

    fn validate_name(name: &str) -> LedgerResult<String> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(LedgerError::validation("Name cannot be empty"));
        }
        Ok(trimmed.to_string())
    }
}
