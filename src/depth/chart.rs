//! Team-wide depth chart assembly and display formatting

use crate::cli::types::{PositionId, TeamId};
use crate::storage::{Player, Position, RankedPlayer};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Placeholder printed wherever a list would be empty
pub const NO_LIST: &str = "<NO LIST>";

/// Players at one position, starter first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionChart {
    pub position: String,
    pub players: Vec<Player>,
}

impl PositionChart {
    /// `QB - (#12, Tom Brady), (#11, Blaine Gabbert)`
    pub fn line(&self) -> String {
        let players = self
            .players
            .iter()
            .map(|p| format!("({}, {})", p.number, p.name))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{} - {}", self.position, players)
    }
}

/// Every position of a team with its ranked players, in position creation order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepthChart {
    pub team_id: TeamId,
    pub positions: Vec<PositionChart>,
}

impl DepthChart {
    /// Players at the named position (exact, case-sensitive match)
    pub fn get(&self, position: &str) -> Option<&[Player]> {
        self.positions
            .iter()
            .find(|chart| chart.position == position)
            .map(|chart| chart.players.as_slice())
    }

    /// True when the team has no positions at all
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn position_names(&self) -> impl Iterator<Item = &str> {
        self.positions.iter().map(|chart| chart.position.as_str())
    }

    /// One display line per position, or the no-list marker for a team
    /// without positions
    pub fn lines(&self) -> Vec<String> {
        if self.is_empty() {
            return vec![NO_LIST.to_string()];
        }
        self.positions.iter().map(PositionChart::line).collect()
    }
}

/// Fold team assignments into one chart entry per position.
///
/// Positions without assignments get an empty player list. Rows whose
/// position is not in `positions` are ignored.
pub fn assemble(team_id: TeamId, positions: &[Position], ranked: Vec<RankedPlayer>) -> DepthChart {
    let mut by_position: HashMap<PositionId, Vec<RankedPlayer>> = HashMap::new();
    for row in ranked {
        by_position.entry(row.position_id).or_default().push(row);
    }

    let mut ordered: Vec<&Position> = positions.iter().collect();
    ordered.sort_by_key(|p| p.position_id);

    let positions = ordered
        .into_iter()
        .map(|position| {
            let mut rows = by_position.remove(&position.position_id).unwrap_or_default();
            rows.sort_by_key(|row| row.rank);
            PositionChart {
                position: position.name.clone(),
                players: rows.into_iter().map(|row| row.player).collect(),
            }
        })
        .collect();

    DepthChart { team_id, positions }
}

/// `#12 – Tom Brady` lines, or the no-list marker when empty
pub fn player_lines(players: &[Player]) -> Vec<String> {
    if players.is_empty() {
        return vec![NO_LIST.to_string()];
    }
    players.iter().map(Player::label).collect()
}
