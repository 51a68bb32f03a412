//! Ranking engine: ordered assignments per position.
//!
//! Ranks at a position are always exactly `0..n`. Inserting at an occupied
//! rank pushes that player and everyone below down by one; removing a player
//! pulls everyone below up by one. Each operation runs in one store session
//! under the position lock, and is re-checked before commit.

use super::chart::{self, DepthChart};
use super::locks::PositionLocks;
use super::store::{RecordSession, RecordStore};
use crate::cli::types::{PlayerId, PositionId, Rank, TeamId};
use crate::error::{DepthChartError, Result};
use crate::storage::{Assignment, Player};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info};

/// What Insert does when the player already holds a rank at the position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Fail with `DuplicateAssignment`
    #[default]
    Reject,
    /// Move the player to the requested rank
    Reposition,
}

/// Stateless view over a shared store and lock registry; cheap to build per
/// request.
pub struct RankingEngine<'a, S: RecordStore> {
    store: &'a S,
    locks: &'a PositionLocks,
    duplicate_policy: DuplicatePolicy,
}

impl<'a, S: RecordStore> RankingEngine<'a, S> {
    pub fn new(store: &'a S, locks: &'a PositionLocks) -> Self {
        Self {
            store,
            locks,
            duplicate_policy: DuplicatePolicy::default(),
        }
    }

    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    /// Put `player_id` on the depth chart of `position_id`.
    ///
    /// With no `desired_rank` the player goes to the bottom. A desired rank
    /// past the bottom is clamped to the bottom. Returns the stored assignment.
    pub fn insert(
        &self,
        position_id: PositionId,
        player_id: PlayerId,
        desired_rank: Option<Rank>,
    ) -> Result<Assignment> {
        let lock = self.position_lock(position_id)?;
        let _guard = lock.write().unwrap_or_else(PoisonError::into_inner);
        let mut session = self.store.begin()?;

        let position = session
            .get_position(position_id)?
            .ok_or_else(|| DepthChartError::not_found("position", position_id))?;
        let player = session
            .get_player(player_id)?
            .ok_or_else(|| DepthChartError::not_found("player", player_id))?;
        if player.team_id != position.team_id {
            return Err(DepthChartError::not_found(
                "player",
                format!("{} on team {}", player.number, position.team_id),
            ));
        }

        if let Some(existing) = session.find_assignment(position_id, player_id)? {
            match self.duplicate_policy {
                DuplicatePolicy::Reject => {
                    return Err(DepthChartError::DuplicateAssignment {
                        position_id,
                        player_id,
                    })
                }
                DuplicatePolicy::Reposition => {
                    debug!(
                        "Repositioning player {} at {} from rank {}",
                        player.number, position.name, existing.rank
                    );
                    detach(&mut session, &existing)?;
                }
            }
        }

        let current = session.list_assignments(position_id)?;
        let bottom = current
            .iter()
            .map(|a| a.rank)
            .max()
            .map_or(Rank::STARTER, Rank::next);
        let rank = desired_rank.map_or(bottom, |r| r.min(bottom));

        // Shift from the bottom up so no two rows ever share a rank
        let displaced: Vec<Assignment> = current.into_iter().filter(|a| a.rank >= rank).collect();
        for a in displaced.iter().rev() {
            session.upsert_assignment(&a.with_rank(a.rank.next()))?;
        }

        let assignment = Assignment::new(position_id, player_id, rank);
        session.upsert_assignment(&assignment)?;

        verify_ranks(position_id, &session.list_assignments(position_id)?)?;
        session.commit()?;

        info!(
            "Added {} – {} to {} at rank {} ({} shifted down)",
            player.number,
            player.name,
            position.name,
            rank,
            displaced.len()
        );
        Ok(assignment)
    }

    /// Take `player_id` off the depth chart of `position_id`, closing the gap.
    ///
    /// Returns false, with nothing changed, when the player was not on it.
    /// Fails with `NotFound` for an unknown position.
    pub fn remove(&self, position_id: PositionId, player_id: PlayerId) -> Result<bool> {
        let lock = self.position_lock(position_id)?;
        let _guard = lock.write().unwrap_or_else(PoisonError::into_inner);
        let mut session = self.store.begin()?;

        let Some(existing) = session.find_assignment(position_id, player_id)? else {
            debug!(
                "Player {} holds no rank at position {}",
                player_id, position_id
            );
            return Ok(false);
        };

        let compacted = detach(&mut session, &existing)?;

        verify_ranks(position_id, &session.list_assignments(position_id)?)?;
        session.commit()?;

        info!(
            "Removed player {} from position {} at rank {} ({} moved up)",
            player_id, position_id, existing.rank, compacted
        );
        Ok(true)
    }

    /// Players ranked strictly below `player_id` at `position_id`, nearest first.
    ///
    /// Empty when the player is not on the chart or is last on it; fails
    /// with `NotFound` for an unknown position.
    pub fn backups(&self, position_id: PositionId, player_id: PlayerId) -> Result<Vec<Player>> {
        let lock = self.position_lock(position_id)?;
        let _guard = lock.read().unwrap_or_else(PoisonError::into_inner);
        let session = self.store.snapshot()?;

        let Some(reference) = session.find_assignment(position_id, player_id)? else {
            debug!(
                "No backups: player {} holds no rank at position {}",
                player_id, position_id
            );
            return Ok(Vec::new());
        };

        let mut backups = Vec::new();
        for a in session
            .list_assignments(position_id)?
            .into_iter()
            .filter(|a| a.rank > reference.rank)
        {
            let player = session.get_player(a.player_id)?.ok_or_else(|| {
                DepthChartError::invariant(format!(
                    "assignment at position {} references missing player {}",
                    position_id, a.player_id
                ))
            })?;
            backups.push(player);
        }

        debug!(
            "Found {} backups for player {} at position {}",
            backups.len(),
            player_id,
            position_id
        );
        Ok(backups)
    }

    /// Lock handle for a position that exists in the store; `NotFound`
    /// otherwise, without registering a lock.
    fn position_lock(&self, position_id: PositionId) -> Result<Arc<RwLock<()>>> {
        if self.store.snapshot()?.get_position(position_id)?.is_none() {
            return Err(DepthChartError::not_found("position", position_id));
        }
        Ok(self.locks.handle(position_id))
    }

    /// Every position of the team with its players ordered by rank.
    ///
    /// Fails with `NotFound` for an unknown team; a team without positions
    /// yields an empty chart.
    pub fn full_chart(&self, team_id: TeamId) -> Result<DepthChart> {
        let positions = {
            let session = self.store.snapshot()?;
            if !session.team_exists(team_id)? {
                return Err(DepthChartError::not_found("team", team_id));
            }
            session.list_positions(team_id)?
        };

        let ids: Vec<PositionId> = positions.iter().map(|p| p.position_id).collect();
        let handles = self.locks.handles(&ids);
        let _guards: Vec<_> = handles
            .iter()
            .map(|h| h.read().unwrap_or_else(PoisonError::into_inner))
            .collect();

        let session = self.store.snapshot()?;
        let ranked = session.list_team_assignments(team_id)?;
        let chart = chart::assemble(team_id, &positions, ranked);

        debug!(
            "Assembled depth chart for team {} with {} positions",
            team_id,
            chart.positions.len()
        );
        Ok(chart)
    }
}

/// Delete `existing` and move everyone below it up one rank.
/// Returns how many assignments moved.
fn detach<T: RecordSession>(session: &mut T, existing: &Assignment) -> Result<usize> {
    if !session.delete_assignment(existing.position_id, existing.player_id)? {
        return Err(DepthChartError::invariant(format!(
            "assignment of player {} at position {} vanished mid-operation",
            existing.player_id, existing.position_id
        )));
    }

    // Top down, for the same reason inserts shift bottom up
    let below: Vec<Assignment> = session
        .list_assignments(existing.position_id)?
        .into_iter()
        .filter(|a| a.rank > existing.rank)
        .collect();
    for a in &below {
        session.upsert_assignment(&a.with_rank(a.rank.prev()))?;
    }
    Ok(below.len())
}

/// Ranks at one position must be exactly `0..n`, each held once.
///
/// `assignments` must be ascending by rank, as `list_assignments` returns them.
pub fn verify_ranks(position_id: PositionId, assignments: &[Assignment]) -> Result<()> {
    for (expected, pair) in assignments.iter().enumerate() {
        let expected = Rank::new(expected as u32);
        if pair.rank == expected {
            continue;
        }
        let holders: Vec<String> = assignments
            .iter()
            .filter(|a| a.rank == pair.rank)
            .map(|a| a.player_id.to_string())
            .collect();
        let message = if holders.len() > 1 {
            format!(
                "rank {} at position {} held by players {}",
                pair.rank,
                position_id,
                holders.join(", ")
            )
        } else {
            format!(
                "position {} expected rank {} but found {}",
                position_id, expected, pair.rank
            )
        };
        return Err(DepthChartError::invariant(message));
    }
    Ok(())
}
