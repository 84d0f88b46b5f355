use tracing::warn;

use crate::{
    dao::{
        kv::{SharedStore, read_json, write_json},
        models::{PlayerEntity, RoundEntity, StoredRounds},
        storage::StorageResult,
    },
    state::ledger::{GameState, Player, Round, SEAT_COUNT, default_players},
};

/// Key holding the serialized player set.
pub const PLAYERS_KEY: &str = "gongzhu_players";
/// Key holding the serialized round history, newest first.
pub const ROUNDS_KEY: &str = "gongzhu_rounds";

/// Mirrors a [`GameState`] into two independently keyed blobs.
#[derive(Clone)]
pub struct LedgerRepository {
    store: SharedStore,
}

impl LedgerRepository {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Restore the ledger. Each blob falls back to its default on its own, so rounds can
    /// survive a corrupt player list and vice versa. A player list without exactly
    /// [`SEAT_COUNT`] seats counts as corrupt; an undecodable round is dropped alone.
    pub fn load(&self) -> GameState {
        let players = read_json::<Vec<PlayerEntity>>(self.store.as_ref(), PLAYERS_KEY)
            .filter(|players| {
                let complete = players.len() == SEAT_COUNT;
                if !complete {
                    warn!(
                        key = PLAYERS_KEY,
                        seats = players.len(),
                        expected = SEAT_COUNT,
                        "stored player list has the wrong seat count; using defaults"
                    );
                }
                complete
            })
            .map(|players| players.into_iter().map(Player::from).collect())
            .unwrap_or_else(default_players);

        let rounds = read_json::<StoredRounds>(self.store.as_ref(), ROUNDS_KEY)
            .map(|StoredRounds(rounds)| rounds.into_iter().map(Round::from).collect())
            .unwrap_or_default();

        GameState::restore(players, rounds)
    }

    /// Write both blobs.
    pub fn save(&self, state: &GameState) -> StorageResult<()> {
        let players: Vec<PlayerEntity> = state.players().iter().map(Into::into).collect();
        let rounds: Vec<RoundEntity> = state.rounds().iter().map(Into::into).collect();
        write_json(self.store.as_ref(), PLAYERS_KEY, &players)?;
        write_json(self.store.as_ref(), ROUNDS_KEY, &rounds)
    }
}
