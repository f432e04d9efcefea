use log::info;
use std::sync::Arc;

use crate::domain::commands::entries::{
    AddEntryCommand, AvailableSavedQuery, DeleteEntryCommand, UpdateEntryCommand,
};
use crate::domain::errors::LedgerResult;
use crate::domain::ledger::{EntryDraft, LedgerEngine};
use crate::domain::models::{Entry, Kid};
use crate::storage::{KidStore, Repository};

/// Service for recording, editing and removing a kid's entries
#[derive(Clone)]
pub struct EntryService {
    store: KidStore,
    engine: LedgerEngine,
}

impl EntryService {
    pub fn new(repository: Arc<dyn Repository>) -> Self {
        Self {
            store: KidStore::new(repository),
            engine: LedgerEngine::new(),
        }
    }

    /// Build the draft for a new entry, falling back to the kid's default
    /// allocation and interest rate
    fn draft_for(kid: &Kid, command: &AddEntryCommand) -> EntryDraft {
        let mut draft = EntryDraft::with_defaults(
            kid,
            command.period.clone(),
            command.period_type,
            command.amount,
            command.used_from_saved,
        );
        if let Some(allocation) = command.allocation {
            draft.spent_percent = allocation.spent;
            draft.saved_percent = allocation.saved;
            draft.given_percent = allocation.given;
        }
        if let Some(rate) = command.interest_rate {
            draft.interest_rate = rate;
        }
        draft
    }

    pub fn add_entry(&self, command: AddEntryCommand) -> LedgerResult<Entry> {
        info!(
            "Adding entry for kid {}: period={}, amount={}",
            command.kid_id, command.period, command.amount
        );
        self.store.modify_kid(&command.kid_id, |kid| {
            let draft = Self::draft_for(kid, &command);
            self.engine.add_entry(kid, draft)
        })
    }

    pub fn update_entry(&self, command: UpdateEntryCommand) -> LedgerResult<Entry> {
        info!("Updating entry {} for kid {}", command.entry_id, command.kid_id);
        self.store.modify_kid(&command.kid_id, |kid| {
            self.engine.update_entry(kid, &command.entry_id, command.update)
        })
    }

    pub fn delete_entry(&self, command: DeleteEntryCommand) -> LedgerResult<Entry> {
        info!("Deleting entry {} for kid {}", command.entry_id, command.kid_id);
        self.store.modify_kid(&command.kid_id, |kid| {
            self.engine.delete_entry(kid, &command.entry_id)
        })
    }

    /// Withdrawal ceiling for an existing entry
    pub fn available_saved(&self, query: AvailableSavedQuery) -> LedgerResult<f64> {
        let kid = self.store.get_kid(&query.kid_id)?;
        self.engine.available_saved_for_entry(&kid, &query.entry_id)
    }

    /// Withdrawal ceiling a new entry would have, without recording it
    pub fn preview_available_saved(&self, command: &AddEntryCommand) -> LedgerResult<f64> {
        let kid = self.store.get_kid(&command.kid_id)?;
        let draft = Self::draft_for(&kid, command);
        Ok(self.engine.available_saved(&kid, &draft, None))
    }
}
