//! Contracts the ranking engine consumes from its collaborators.
//!
//! - [`RecordStore`] hands out transactional sessions over assignment and
//!   player records.
//! - [`EntityResolver`] maps human keys (position name, jersey number) to ids.

use crate::cli::types::{PlayerId, PlayerNumber, PositionId, TeamId};
use crate::error::Result;
use crate::storage::{Assignment, Player, Position, RankedPlayer};

/// Durable keyed storage for assignments and player display attributes.
///
/// Every engine operation runs inside exactly one session. Writes become
/// visible only after [`RecordSession::commit`]; a session dropped without
/// commit discards all of its writes.
pub trait RecordStore: Send + Sync {
    type Session<'a>: RecordSession
    where
        Self: 'a;

    /// Open a session for an operation that will write.
    fn begin(&self) -> Result<Self::Session<'_>>;

    /// Open a session for a read-only operation.
    fn snapshot(&self) -> Result<Self::Session<'_>>;
}

/// One atomic unit of work against the record store.
pub trait RecordSession {
    fn team_exists(&self, team_id: TeamId) -> Result<bool>;

    fn get_position(&self, position_id: PositionId) -> Result<Option<Position>>;

    /// Positions of a team in creation order
    fn list_positions(&self, team_id: TeamId) -> Result<Vec<Position>>;

    fn get_player(&self, player_id: PlayerId) -> Result<Option<Player>>;

    fn find_assignment(
        &self,
        position_id: PositionId,
        player_id: PlayerId,
    ) -> Result<Option<Assignment>>;

    /// Assignments at one position, ascending by rank
    fn list_assignments(&self, position_id: PositionId) -> Result<Vec<Assignment>>;

    /// Every assignment on a team joined with its player, ordered by
    /// position then rank
    fn list_team_assignments(&self, team_id: TeamId) -> Result<Vec<RankedPlayer>>;

    /// Insert the assignment, or overwrite the rank of the existing
    /// `(position_id, player_id)` row
    fn upsert_assignment(&mut self, assignment: &Assignment) -> Result<()>;

    /// Returns false when there was nothing to delete
    fn delete_assignment(&mut self, position_id: PositionId, player_id: PlayerId) -> Result<bool>;

    fn commit(self) -> Result<()>;
}

/// Maps human-facing keys to record ids.
///
/// An unknown team is an error; an unknown name or number within a known
/// team is `Ok(None)`.
pub trait EntityResolver {
    fn resolve_position(&self, team_id: TeamId, name: &str) -> Result<Option<PositionId>>;

    fn resolve_player(&self, team_id: TeamId, number: PlayerNumber) -> Result<Option<PlayerId>>;
}
