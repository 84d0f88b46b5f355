//! Ledger operations paired with their persistence write.

use tracing::{debug, info, warn};

use crate::{
    dao::{kv::SharedStore, ledger_store::LedgerRepository},
    state::{
        ledger::{Deltas, GameState, PlayerId, RoundId},
        score_entry::{ScoreDraft, ScoreEntryError},
    },
};

/// Owns the ledger and saves it after every mutation that changed something.
///
/// A failed save is logged and the in-memory state is kept; the next successful save
/// catches the store up.
pub struct Scorekeeper {
    state: GameState,
    repository: LedgerRepository,
}

impl Scorekeeper {
    /// Restore the ledger from `store`, falling back to a fresh table.
    pub fn open(store: SharedStore) -> Self {
        let repository = LedgerRepository::new(store);
        let state = repository.load();
        info!(
            players = state.players().len(),
            rounds = state.rounds().len(),
            "ledger restored"
        );
        Self { state, repository }
    }

    /// Current ledger.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Record a round from raw deltas.
    pub fn record_round(&mut self, deltas: Deltas) -> RoundId {
        let id = self.state.record_round(deltas);
        debug!(round = %id, "round recorded");
        self.persist();
        id
    }

    /// Record a round from a score sheet; an invalid sheet records nothing.
    pub fn record_draft(&mut self, draft: &ScoreDraft) -> Result<RoundId, ScoreEntryError> {
        let deltas = draft.finalize(self.state.players())?;
        Ok(self.record_round(deltas))
    }

    /// Delete a round and reverse its contribution. Returns `false` when no round matched.
    pub fn delete_round(&mut self, id: &RoundId) -> bool {
        match self.state.delete_round(id) {
            Some(_) => {
                debug!(round = %id, "round deleted");
                self.persist();
                true
            }
            None => {
                debug!(round = %id, "delete ignored; unknown round");
                false
            }
        }
    }

    /// Rename a player. Returns `false` for an unknown id.
    pub fn rename_player(&mut self, id: &PlayerId, name: impl Into<String>) -> bool {
        let renamed = self.state.rename_player(id, name);
        if renamed {
            self.persist();
        }
        renamed
    }

    /// Clear history and zero totals, keeping the players as they are.
    pub fn reset(&mut self) {
        self.state.reset();
        info!("ledger reset");
        self.persist();
    }

    /// Discard everything, players included, and start from the default table.
    pub fn start_over(&mut self) {
        self.state = GameState::initialize();
        info!("ledger reinitialized");
        self.persist();
    }

    fn persist(&self) {
        if let Err(err) = self.repository.save(&self.state) {
            warn!(error = %err, "failed to persist ledger; keeping in-memory state");
        }
    }
}
