use serde::{Deserialize, Serialize};
use serde_with::{DefaultOnError, VecSkipError, serde_as};

use crate::state::ledger::{Deltas, Player, PlayerId, Round, RoundId};

/// Player record as stored under the players key.
///
/// Unknown fields are ignored; a missing or mistyped `totalScore`/`color` is defaulted
/// instead of discarding the whole blob.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlayerEntity {
    /// Seat identifier.
    pub id: PlayerId,
    /// Display name.
    pub name: String,
    /// Running total at save time.
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub total_score: i64,
    /// Display color.
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub color: String,
}

/// Round record as stored under the rounds key.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RoundEntity {
    /// Durable identifier.
    pub id: RoundId,
    /// Creation time, milliseconds since the Unix epoch.
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub timestamp: i64,
    /// Player id to delta.
    #[serde(default)]
    pub scores: Deltas,
}

/// Round history as read back from the rounds key. A round that fails to decode is dropped
/// without discarding its neighbours.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct StoredRounds(#[serde_as(as = "VecSkipError<_>")] pub Vec<RoundEntity>);

impl From<&Player> for PlayerEntity {
    fn from(player: &Player) -> Self {
        Self {
            id: player.id.clone(),
            name: player.name.clone(),
            total_score: player.total_score(),
            color: player.color.clone(),
        }
    }
}

impl From<PlayerEntity> for Player {
    fn from(entity: PlayerEntity) -> Self {
        Player::new(entity.id, entity.name, entity.color).with_total(entity.total_score)
    }
}

impl From<&Round> for RoundEntity {
    fn from(round: &Round) -> Self {
        Self {
            id: round.id().clone(),
            timestamp: round.timestamp_ms(),
            scores: round.scores().clone(),
        }
    }
}

impl From<RoundEntity> for Round {
    fn from(entity: RoundEntity) -> Self {
        Round::from_parts(entity.id, entity.timestamp, entity.scores)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_tolerates_missing_and_mistyped_fields() {
        let raw = r##"{"id":"p1","name":"North","totalScore":"oops","extra":true}"##;
        let entity: PlayerEntity = serde_json::from_str(raw).unwrap();
        assert_eq!(entity.total_score, 0);
        assert_eq!(entity.color, "");
    }

    #[test]
    fn player_uses_camel_case_fields() {
        let entity = PlayerEntity {
            id: PlayerId::from("p2"),
            name: "West".into(),
            total_score: -40,
            color: "#42A5F5".into(),
        };
        let json = serde_json::to_value(&entity).unwrap();
        assert_eq!(json["totalScore"], -40);
        assert_eq!(json["id"], "p2");
    }

    #[test]
    fn round_reads_saved_browser_format() {
        let raw = r#"{
            "id": "1718000000000",
            "timestamp": 1718000000000,
            "scores": { "p1": -100, "p4": 100 }
        }"#;
        let round: Round = serde_json::from_str::<RoundEntity>(raw).unwrap().into();
        assert_eq!(round.id().as_str(), "1718000000000");
        assert_eq!(round.delta_for(&PlayerId::from("p4")), 100);
        assert_eq!(round.delta_for(&PlayerId::from("p2")), 0);
    }

    #[test]
    fn bad_round_is_skipped_alone() {
        let raw = r#"[
            {"id":"a","timestamp":1,"scores":{"p1":-100}},
            {"id":"b","timestamp":2,"scores":{"p1":"x"}},
            {"id":"c","timestamp":3,"scores":{"p2":40}}
        ]"#;
        let StoredRounds(rounds) = serde_json::from_str(raw).unwrap();
        let ids: Vec<&str> = rounds.iter().map(|round| round.id.as_str()).collect();
        assert_eq!(ids, ["a", "c"]);
    }
}
