//! Name-keyed entry points: resolve position names and jersey numbers, then
//! delegate to the ranking engine.

use super::chart::DepthChart;
use super::engine::{DuplicatePolicy, RankingEngine};
use super::locks::PositionLocks;
use super::store::{EntityResolver, RecordSession, RecordStore};
use crate::cli::types::{PlayerId, PlayerNumber, PositionId, Rank, TeamId};
use crate::error::{DepthChartError, Result};
use crate::storage::{Assignment, Player};
use tracing::warn;

pub struct DepthChartService<'a, D: RecordStore + EntityResolver> {
    resolver: &'a D,
    engine: RankingEngine<'a, D>,
}

impl<'a, D: RecordStore + EntityResolver> DepthChartService<'a, D> {
    pub fn new(db: &'a D, locks: &'a PositionLocks, policy: DuplicatePolicy) -> Self {
        Self {
            resolver: db,
            engine: RankingEngine::new(db, locks).with_duplicate_policy(policy),
        }
    }

    /// Add the player wearing `number` to the named position's depth chart
    pub fn add_player(
        &self,
        team_id: TeamId,
        position: &str,
        number: PlayerNumber,
        rank: Option<Rank>,
    ) -> Result<Assignment> {
        let (position_id, player_id) = self.resolve_required(team_id, position, number)?;
        self.engine.insert(position_id, player_id, rank)
    }

    /// Remove the player from the named position's depth chart.
    ///
    /// Returns the removed player, or `None` when they were not on it.
    pub fn remove_player(
        &self,
        team_id: TeamId,
        position: &str,
        number: PlayerNumber,
    ) -> Result<Option<Player>> {
        let (position_id, player_id) = self.resolve_required(team_id, position, number)?;

        let removed = self.resolver.snapshot()?.get_player(player_id)?;
        if self.engine.remove(position_id, player_id)? {
            Ok(removed)
        } else {
            warn!("There is no player {} in {} position", number, position);
            Ok(None)
        }
    }

    /// Backups of the player wearing `number` at the named position.
    ///
    /// An unknown position or number yields an empty list, like a player
    /// who is not on the chart.
    pub fn backups(
        &self,
        team_id: TeamId,
        position: &str,
        number: PlayerNumber,
    ) -> Result<Vec<Player>> {
        let position_id = self.resolver.resolve_position(team_id, position)?;
        let player_id = self.resolver.resolve_player(team_id, number)?;
        let backups = match (position_id, player_id) {
            (Some(position_id), Some(player_id)) => self.engine.backups(position_id, player_id)?,
            _ => Vec::new(),
        };

        if backups.is_empty() {
            warn!(
                "There are no backups for player {} in {} position",
                number, position
            );
        }
        Ok(backups)
    }

    pub fn full_chart(&self, team_id: TeamId) -> Result<DepthChart> {
        self.engine.full_chart(team_id)
    }

    fn resolve_required(
        &self,
        team_id: TeamId,
        position: &str,
        number: PlayerNumber,
    ) -> Result<(PositionId, PlayerId)> {
        let position_id = self
            .resolver
            .resolve_position(team_id, position)?
            .ok_or_else(|| DepthChartError::not_found("position", position))?;
        let player_id = self
            .resolver
            .resolve_player(team_id, number)?
            .ok_or_else(|| DepthChartError::not_found("player", number))?;
        Ok((position_id, player_id))
    }
}
