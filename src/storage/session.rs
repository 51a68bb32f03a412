//! SQLite implementation of the record store contract

use super::{
    models::*,
    queries::{player_at, row_to_player, row_to_position, team_exists},
    schema::DepthChartDatabase,
};
use crate::cli::types::{PlayerId, PositionId, Rank, TeamId};
use crate::depth::store::{RecordSession, RecordStore};
use crate::error::Result;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::MutexGuard;
use tracing::{debug, warn};

/// An open SQLite transaction holding the connection lock.
///
/// Rolled back on drop unless [`RecordSession::commit`] was called.
pub struct SqliteSession<'a> {
    conn: MutexGuard<'a, Connection>,
    finished: bool,
}

impl<'a> SqliteSession<'a> {
    fn open(conn: MutexGuard<'a, Connection>, statement: &str) -> Result<Self> {
        conn.execute_batch(statement)?;
        Ok(Self {
            conn,
            finished: false,
        })
    }
}

impl RecordStore for DepthChartDatabase {
    type Session<'a> = SqliteSession<'a>;

    fn begin(&self) -> Result<SqliteSession<'_>> {
        SqliteSession::open(self.conn(), "BEGIN IMMEDIATE")
    }

    fn snapshot(&self) -> Result<SqliteSession<'_>> {
        SqliteSession::open(self.conn(), "BEGIN DEFERRED")
    }
}

impl RecordSession for SqliteSession<'_> {
    fn team_exists(&self, team_id: TeamId) -> Result<bool> {
        team_exists(&self.conn, team_id)
    }

    fn get_position(&self, position_id: PositionId) -> Result<Option<Position>> {
        let position = self
            .conn
            .query_row(
                "SELECT position_id, team_id, name FROM positions WHERE position_id = ?",
                params![position_id.as_i64()],
                row_to_position,
            )
            .optional()?;
        Ok(position)
    }

    fn list_positions(&self, team_id: TeamId) -> Result<Vec<Position>> {
        let mut stmt = self.conn.prepare(
            "SELECT position_id, team_id, name
             FROM positions
             WHERE team_id = ?
             ORDER BY position_id",
        )?;
        let rows = stmt.query_map(params![team_id.as_i64()], row_to_position)?;

        let mut positions = Vec::new();
        for row in rows {
            positions.push(row?);
        }
        Ok(positions)
    }

    fn get_player(&self, player_id: PlayerId) -> Result<Option<Player>> {
        let player = self
            .conn
            .query_row(
                "SELECT player_id, team_id, number, name, odds FROM players WHERE player_id = ?",
                params![player_id.as_i64()],
                row_to_player,
            )
            .optional()?;
        Ok(player)
    }

    fn find_assignment(
        &self,
        position_id: PositionId,
        player_id: PlayerId,
    ) -> Result<Option<Assignment>> {
        let assignment = self
            .conn
            .query_row(
                "SELECT rank FROM assignments WHERE position_id = ? AND player_id = ?",
                params![position_id.as_i64(), player_id.as_i64()],
                |row| Ok(Assignment::new(position_id, player_id, Rank::new(row.get(0)?))),
            )
            .optional()?;
        Ok(assignment)
    }

    fn list_assignments(&self, position_id: PositionId) -> Result<Vec<Assignment>> {
        let mut stmt = self.conn.prepare(
            "SELECT player_id, rank
             FROM assignments
             WHERE position_id = ?
             ORDER BY rank",
        )?;
        let rows = stmt.query_map(params![position_id.as_i64()], |row| {
            Ok(Assignment::new(
                position_id,
                PlayerId::new(row.get(0)?),
                Rank::new(row.get(1)?),
            ))
        })?;

        let mut assignments = Vec::new();
        for row in rows {
            assignments.push(row?);
        }
        Ok(assignments)
    }

    fn list_team_assignments(&self, team_id: TeamId) -> Result<Vec<RankedPlayer>> {
        let mut stmt = self.conn.prepare(
            "SELECT a.position_id, a.rank,
                    p.player_id, p.team_id, p.number, p.name, p.odds
             FROM assignments a
             JOIN positions pos ON pos.position_id = a.position_id
             JOIN players p ON p.player_id = a.player_id
             WHERE pos.team_id = ?
             ORDER BY a.position_id, a.rank",
        )?;
        let rows = stmt.query_map(params![team_id.as_i64()], |row| {
            Ok(RankedPlayer {
                position_id: PositionId::new(row.get(0)?),
                rank: Rank::new(row.get(1)?),
                player: player_at(row, 2)?,
            })
        })?;

        let mut ranked = Vec::new();
        for row in rows {
            ranked.push(row?);
        }
        Ok(ranked)
    }

    fn upsert_assignment(&mut self, assignment: &Assignment) -> Result<()> {
        self.conn.execute(
            "INSERT INTO assignments (position_id, player_id, rank)
             VALUES (?, ?, ?)
             ON CONFLICT (position_id, player_id) DO UPDATE SET rank = excluded.rank",
            params![
                assignment.position_id.as_i64(),
                assignment.player_id.as_i64(),
                assignment.rank.as_u32()
            ],
        )?;
        Ok(())
    }

    fn delete_assignment(&mut self, position_id: PositionId, player_id: PlayerId) -> Result<bool> {
        let rows_affected = self.conn.execute(
            "DELETE FROM assignments WHERE position_id = ? AND player_id = ?",
            params![position_id.as_i64(), player_id.as_i64()],
        )?;
        Ok(rows_affected > 0)
    }

    fn commit(mut self) -> Result<()> {
        self.conn.execute_batch("COMMIT")?;
        self.finished = true;
        Ok(())
    }
}

impl Drop for SqliteSession<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        debug!("Rolling back uncommitted depth chart session");
        if let Err(e) = self.conn.execute_batch("ROLLBACK") {
            warn!("Rollback failed: {}", e);
        }
    }
}
