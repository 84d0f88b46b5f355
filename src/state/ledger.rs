use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::warn;
use uuid::Uuid;

/// Seat names and colors used for a fresh table.
/// Number of seats at a table.
pub const SEAT_COUNT: usize = 4;

const DEFAULT_SEATS: [(&str, &str, &str); SEAT_COUNT] = [
    ("p1", "North (北)", "#EF5350"),
    ("p2", "West (西)", "#42A5F5"),
    ("p3", "South (南)", "#66BB6A"),
    ("p4", "East (东)", "#FFCA28"),
];

/// Stable identifier of a seat at the table (e.g. `p1`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    /// Wrap an identifier string.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlayerId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Durable key of a recorded round.
///
/// Older saves used the creation time in milliseconds as the id, so any string is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoundId(String);

impl RoundId {
    /// Wrap an identifier string.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Allocate a fresh identifier that cannot collide with any other round.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Borrow the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RoundId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for RoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-player score deltas of a single round, in entry order.
pub type Deltas = IndexMap<PlayerId, i64>;

/// Delta contributed to `player` by a score map; an absent entry counts as zero.
pub fn delta_for(scores: &Deltas, player: &PlayerId) -> i64 {
    scores.get(player).copied().unwrap_or(0)
}

/// A seat at the table together with its running total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    /// Stable identifier, never reassigned.
    pub id: PlayerId,
    /// Display name chosen by the user.
    pub name: String,
    /// Display color (CSS hex string).
    pub color: String,
    total_score: i64,
}

impl Player {
    /// Build a player with a zero total.
    pub fn new(id: impl Into<PlayerId>, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: color.into(),
            total_score: 0,
        }
    }

    /// Running total over every round currently in history.
    pub fn total_score(&self) -> i64 {
        self.total_score
    }

    pub(crate) fn with_total(mut self, total_score: i64) -> Self {
        self.total_score = total_score;
        self
    }
}

/// One immutable batch of score deltas recorded in a single action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    id: RoundId,
    timestamp_ms: i64,
    scores: Deltas,
}

impl Round {
    /// Create a round stamped with the current time and a fresh identifier.
    pub fn new(scores: Deltas) -> Self {
        Self {
            id: RoundId::generate(),
            timestamp_ms: now_millis(),
            scores,
        }
    }

    /// Rebuild a round from persisted parts.
    pub fn from_parts(id: RoundId, timestamp_ms: i64, scores: Deltas) -> Self {
        Self {
            id,
            timestamp_ms,
            scores,
        }
    }

    /// Durable identifier.
    pub fn id(&self) -> &RoundId {
        &self.id
    }

    /// Creation time in milliseconds since the Unix epoch.
    pub fn timestamp_ms(&self) -> i64 {
        self.timestamp_ms
    }

    /// Creation time, if the stored timestamp is in range.
    pub fn recorded_at(&self) -> Option<OffsetDateTime> {
        OffsetDateTime::from_unix_timestamp_nanos(i128::from(self.timestamp_ms) * 1_000_000).ok()
    }

    /// Raw score map as entered.
    pub fn scores(&self) -> &Deltas {
        &self.scores
    }

    /// Delta this round contributes to `player`.
    pub fn delta_for(&self, player: &PlayerId) -> i64 {
        delta_for(&self.scores, player)
    }
}

/// Player ranked by total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Standing<'a> {
    /// Zero-based rank; 0 is the leader.
    pub rank: usize,
    /// The ranked player.
    pub player: &'a Player,
    /// Whether the player currently leads the table.
    pub is_leading: bool,
    /// Whether the player currently sits in last place.
    pub is_trailing: bool,
}

/// The ledger: the fixed player set plus round history, newest first.
///
/// Totals are maintained incrementally; [`GameState::recomputed_totals`] gives the
/// from-scratch sum they must always equal. All arithmetic wraps so that deleting a
/// round is the exact inverse of recording it for any delta.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    players: Vec<Player>,
    rounds: Vec<Round>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::initialize()
    }
}

impl GameState {
    /// The four default seats with zero totals and no history.
    pub fn initialize() -> Self {
        Self {
            players: default_players(),
            rounds: Vec::new(),
        }
    }

    /// Restore a ledger from persisted parts.
    ///
    /// Totals that disagree with the history (e.g. default players restored next to saved
    /// rounds) are rebuilt from the history.
    pub fn restore(players: Vec<Player>, rounds: Vec<Round>) -> Self {
        let mut state = Self { players, rounds };
        if !state.is_consistent() {
            warn!(
                players = state.players.len(),
                rounds = state.rounds.len(),
                "persisted totals disagree with round history; recomputing"
            );
            let totals = state.recomputed_totals();
            for player in &mut state.players {
                player.total_score = totals.get(&player.id).copied().unwrap_or(0);
            }
        }
        state
    }

    /// Current players in seating order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Round history, newest first.
    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    /// Look up a player by id.
    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|player| &player.id == id)
    }

    /// Look up a round by id.
    pub fn round(&self, id: &RoundId) -> Option<&Round> {
        self.rounds.iter().find(|round| round.id() == id)
    }

    /// Record a new round and add its deltas to every player's total.
    ///
    /// Players missing from `deltas` are unaffected; entries for unknown ids are kept in the
    /// round but contribute to nobody.
    pub fn record_round(&mut self, deltas: Deltas) -> RoundId {
        let round = Round::new(deltas);
        let id = round.id().clone();
        self.push_round(round);
        id
    }

    /// Prepend an already built round, applying its deltas.
    pub fn push_round(&mut self, round: Round) {
        for player in &mut self.players {
            player.total_score = player.total_score.wrapping_add(round.delta_for(&player.id));
        }
        self.rounds.insert(0, round);
    }

    /// Remove a round by id, subtracting exactly what it added.
    ///
    /// Returns the removed round, or `None` when no such round exists (nothing changes).
    pub fn delete_round(&mut self, id: &RoundId) -> Option<Round> {
        let position = self.rounds.iter().position(|round| round.id() == id)?;
        let round = self.rounds.remove(position);
        for player in &mut self.players {
            player.total_score = player.total_score.wrapping_sub(round.delta_for(&player.id));
        }
        Some(round)
    }

    /// Change a player's display name. Returns `false` for an unknown id.
    pub fn rename_player(&mut self, id: &PlayerId, name: impl Into<String>) -> bool {
        match self.players.iter_mut().find(|player| &player.id == id) {
            Some(player) => {
                player.name = name.into();
                true
            }
            None => false,
        }
    }

    /// Drop the whole history and zero every total, keeping names, ids and colors.
    pub fn reset(&mut self) {
        self.rounds.clear();
        for player in &mut self.players {
            player.total_score = 0;
        }
    }

    /// Totals summed from scratch over the current history, keyed by player id.
    pub fn recomputed_totals(&self) -> IndexMap<PlayerId, i64> {
        self.players
            .iter()
            .map(|player| {
                let total = self
                    .rounds
                    .iter()
                    .fold(0i64, |sum, round| sum.wrapping_add(round.delta_for(&player.id)));
                (player.id.clone(), total)
            })
            .collect()
    }

    /// Whether every stored total equals its recomputed value.
    pub fn is_consistent(&self) -> bool {
        let totals = self.recomputed_totals();
        self.players
            .iter()
            .all(|player| totals.get(&player.id) == Some(&player.total_score))
    }

    /// Players ordered by total, highest first; ties keep seating order.
    pub fn standings(&self) -> Vec<Standing<'_>> {
        let mut ordered: Vec<&Player> = self.players.iter().collect();
        ordered.sort_by(|a, b| b.total_score.cmp(&a.total_score));
        let last = ordered.len().saturating_sub(1);
        ordered
            .into_iter()
            .enumerate()
            .map(|(rank, player)| Standing {
                rank,
                player,
                is_leading: rank == 0,
                is_trailing: rank == last,
            })
            .collect()
    }

    /// History newest first, each paired with its chronological number (oldest is 1).
    pub fn numbered_rounds(&self) -> impl Iterator<Item = (usize, &Round)> {
        let count = self.rounds.len();
        self.rounds
            .iter()
            .enumerate()
            .map(move |(index, round)| (count - index, round))
    }
}

/// The four seats used on first run and after a full wipe.
pub fn default_players() -> Vec<Player> {
    DEFAULT_SEATS
        .iter()
        .map(|(id, name, color)| Player::new(*id, *name, *color))
        .collect()
}

fn now_millis() -> i64 {
    let nanos = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
    i64::try_from(nanos).unwrap_or(i64::MAX)
}
