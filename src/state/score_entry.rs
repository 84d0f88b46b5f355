//! Working copy of a score sheet before it becomes a round.

use std::collections::HashMap;

use thiserror::Error;

use crate::state::ledger::{Deltas, Player, PlayerId};

/// Named card events with a fixed point value, offered as shortcuts while entering scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoringEvent {
    /// Took the Queen of Spades.
    Pig,
    /// Took the Jack of Diamonds.
    Sheep,
    /// Took one heart.
    Heart,
}

impl ScoringEvent {
    /// Point value added to a cell when the event is applied.
    pub const fn points(self) -> i64 {
        match self {
            ScoringEvent::Pig => -100,
            ScoringEvent::Sheep => 100,
            ScoringEvent::Heart => -10,
        }
    }
}

/// Rejected score sheet.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScoreEntryError {
    /// A cell holds text that is not a whole number.
    #[error("score for `{player}` is not an integer: `{value}`")]
    NotAnInteger {
        /// Seat whose cell failed to parse.
        player: PlayerId,
        /// Raw text as entered.
        value: String,
    },
}

/// Raw text entered per seat.
#[derive(Debug, Clone, Default)]
pub struct ScoreDraft {
    cells: HashMap<PlayerId, String>,
}

impl ScoreDraft {
    /// Empty sheet; every seat reads as zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw text of a cell, if one was entered.
    pub fn cell(&self, player: &PlayerId) -> Option<&str> {
        self.cells.get(player).map(String::as_str)
    }

    /// Overwrite a cell with raw text.
    pub fn set(&mut self, player: &PlayerId, value: impl Into<String>) {
        self.cells.insert(player.clone(), value.into());
    }

    /// Blank a cell.
    pub fn clear(&mut self, player: &PlayerId) {
        self.cells.remove(player);
    }

    /// Add an event's points to a cell. An unparsable cell is replaced by the event value.
    pub fn add_event(&mut self, player: &PlayerId, event: ScoringEvent) {
        let next = match self.current(player) {
            Some(current) => current.saturating_add(event.points()),
            None => event.points(),
        };
        self.set(player, next.to_string());
    }

    /// Double a cell (Transformer). Leaves an unparsable cell untouched.
    pub fn double(&mut self, player: &PlayerId) {
        if let Some(current) = self.current(player) {
            self.set(player, current.saturating_mul(2).to_string());
        }
    }

    /// Turn the sheet into deltas for every seat; blank cells count as zero.
    pub fn finalize(&self, players: &[Player]) -> Result<Deltas, ScoreEntryError> {
        players
            .iter()
            .map(|player| -> Result<(PlayerId, i64), ScoreEntryError> {
                let delta = match self.cells.get(&player.id).map(|raw| raw.trim()) {
                    None | Some("") => 0,
                    Some(raw) => raw.parse::<i64>().map_err(|_| ScoreEntryError::NotAnInteger {
                        player: player.id.clone(),
                        value: raw.to_string(),
                    })?,
                };
                Ok((player.id.clone(), delta))
            })
            .collect()
    }

    fn current(&self, player: &PlayerId) -> Option<i64> {
        match self.cells.get(player).map(|raw| raw.trim()) {
            None | Some("") => Some(0),
            Some(raw) => raw.parse().ok(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ledger::default_players;

    fn seat(id: &str) -> PlayerId {
        PlayerId::from(id)
    }

    #[test]
    fn blank_sheet_is_all_zero() {
        let deltas = ScoreDraft::new().finalize(&default_players()).unwrap();
        assert_eq!(deltas.len(), 4);
        assert!(deltas.values().all(|delta| *delta == 0));
    }

    #[test]
    fn events_accumulate_and_double() {
        let mut draft = ScoreDraft::new();
        draft.add_event(&seat("p1"), ScoringEvent::Pig);
        draft.add_event(&seat("p1"), ScoringEvent::Heart);
        draft.double(&seat("p1"));
        draft.add_event(&seat("p2"), ScoringEvent::Sheep);

        let deltas = draft.finalize(&default_players()).unwrap();
        assert_eq!(deltas[&seat("p1")], -220);
        assert_eq!(deltas[&seat("p2")], 100);
        assert_eq!(deltas[&seat("p3")], 0);
    }

    #[test]
    fn unparsable_cell_is_replaced_by_event_but_not_doubled() {
        let mut draft = ScoreDraft::new();
        draft.set(&seat("p3"), "abc");
        draft.double(&seat("p3"));
        assert_eq!(draft.cell(&seat("p3")), Some("abc"));

        draft.add_event(&seat("p3"), ScoringEvent::Heart);
        assert_eq!(draft.cell(&seat("p3")), Some("-10"));
    }

    #[test]
    fn invalid_cell_rejects_whole_sheet() {
        let mut draft = ScoreDraft::new();
        draft.set(&seat("p1"), "40");
        draft.set(&seat("p4"), "12x");

        let err = draft.finalize(&default_players()).unwrap_err();
        assert_eq!(
            err,
            ScoreEntryError::NotAnInteger {
                player: seat("p4"),
                value: "12x".into(),
            }
        );
    }

    #[test]
    fn clear_resets_cell() {
        let mut draft = ScoreDraft::new();
        draft.set(&seat("p2"), " -30 ");
        assert_eq!(draft.finalize(&default_players()).unwrap()[&seat("p2")], -30);
        draft.clear(&seat("p2"));
        assert_eq!(draft.cell(&seat("p2")), None);
    }
}
