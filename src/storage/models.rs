//! Data models for the storage layer

use crate::cli::types::{PlayerId, PlayerNumber, PositionId, Rank, SportId, TeamId};
use serde::{Deserialize, Serialize};

/// A sport, the root of the team hierarchy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sport {
    pub sport_id: SportId,
    pub name: String,
}

/// A team within a sport
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub team_id: TeamId,
    pub sport_id: SportId,
    pub name: String,
}

/// A named position on one team. Names are unique within the team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub position_id: PositionId,
    pub team_id: TeamId,
    pub name: String,
}

/// Player information stored in the database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub player_id: PlayerId,
    pub team_id: TeamId,
    pub number: PlayerNumber,
    pub name: String,
    pub odds: Option<String>,
}

impl Player {
    /// Depth chart line format: `#12 – Tom Brady`
    pub fn label(&self) -> String {
        format!("{} – {}", self.number, self.name)
    }
}

/// One player's rank at one position.
///
/// `(position_id, player_id)` is the natural key; rank is unique among the
/// assignments of a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub position_id: PositionId,
    pub player_id: PlayerId,
    pub rank: Rank,
}

impl Assignment {
    pub fn new(position_id: PositionId, player_id: PlayerId, rank: Rank) -> Self {
        Self {
            position_id,
            player_id,
            rank,
        }
    }

    /// Same assignment at a different rank
    pub fn with_rank(self, rank: Rank) -> Self {
        Self { rank, ..self }
    }
}

/// Assignment joined with the player who holds it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedPlayer {
    pub position_id: PositionId,
    pub rank: Rank,
    pub player: Player,
}
