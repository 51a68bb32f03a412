//! Entity CRUD and name/number resolution

use super::{models::*, schema::DepthChartDatabase};
use crate::cli::types::{PlayerId, PlayerNumber, PositionId, SportId, TeamId};
use crate::depth::store::EntityResolver;
use crate::error::{DepthChartError, Result};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::debug;

impl DepthChartDatabase {
    /// Insert a new sport and return its id
    pub fn insert_sport(&self, name: &str) -> Result<SportId> {
        let conn = self.conn();
        conn.execute("INSERT INTO sports (name) VALUES (?)", params![name])?;
        Ok(SportId::new(conn.last_insert_rowid()))
    }

    /// Insert a new team under `sport_id`
    pub fn insert_team(&self, sport_id: SportId, name: &str) -> Result<TeamId> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO teams (sport_id, name) VALUES (?, ?)",
            params![sport_id.as_i64(), name],
        )?;
        Ok(TeamId::new(conn.last_insert_rowid()))
    }

    /// Insert a new position on a team. Fails if the name is taken.
    pub fn insert_position(&self, team_id: TeamId, name: &str) -> Result<PositionId> {
        let conn = self.conn();
        ensure_team(&conn, team_id)?;
        conn.execute(
            "INSERT INTO positions (team_id, name) VALUES (?, ?)",
            params![team_id.as_i64(), name],
        )?;
        Ok(PositionId::new(conn.last_insert_rowid()))
    }

    /// Insert a new player on a team. Fails if the jersey number is taken.
    pub fn insert_player(
        &self,
        team_id: TeamId,
        number: PlayerNumber,
        name: &str,
        odds: Option<&str>,
    ) -> Result<PlayerId> {
        let conn = self.conn();
        ensure_team(&conn, team_id)?;
        conn.execute(
            "INSERT INTO players (team_id, number, name, odds) VALUES (?, ?, ?, ?)",
            params![team_id.as_i64(), number.as_u32(), name, odds],
        )?;
        Ok(PlayerId::new(conn.last_insert_rowid()))
    }

    /// Return the id of the named position, creating it when missing.
    /// The bool is true when a row was created.
    pub fn find_or_insert_position(
        &self,
        team_id: TeamId,
        name: &str,
    ) -> Result<(PositionId, bool)> {
        if let Some(position_id) = self.resolve_position(team_id, name)? {
            return Ok((position_id, false));
        }
        Ok((self.insert_position(team_id, name)?, true))
    }

    /// Return the id of the player wearing `number`, creating them when missing.
    /// An existing player keeps their stored name and odds.
    pub fn find_or_insert_player(
        &self,
        team_id: TeamId,
        number: PlayerNumber,
        name: &str,
        odds: Option<&str>,
    ) -> Result<(PlayerId, bool)> {
        if let Some(player_id) = self.resolve_player(team_id, number)? {
            return Ok((player_id, false));
        }
        Ok((self.insert_player(team_id, number, name, odds)?, true))
    }

    pub fn get_team(&self, team_id: TeamId) -> Result<Option<Team>> {
        let conn = self.conn();
        let team = conn
            .query_row(
                "SELECT team_id, sport_id, name FROM teams WHERE team_id = ?",
                params![team_id.as_i64()],
                row_to_team,
            )
            .optional()?;
        Ok(team)
    }

    /// All teams in creation order
    pub fn list_teams(&self) -> Result<Vec<Team>> {
        let conn = self.conn();
        let mut stmt = conn.prepare("SELECT team_id, sport_id, name FROM teams ORDER BY team_id")?;
        let rows = stmt.query_map([], row_to_team)?;

        let mut teams = Vec::new();
        for row in rows {
            teams.push(row?);
        }
        Ok(teams)
    }

    /// Players on a team ordered by jersey number
    pub fn list_players(&self, team_id: TeamId) -> Result<Vec<Player>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT player_id, team_id, number, name, odds
             FROM players
             WHERE team_id = ?
             ORDER BY number",
        )?;
        let rows = stmt.query_map(params![team_id.as_i64()], row_to_player)?;

        let mut players = Vec::new();
        for row in rows {
            players.push(row?);
        }
        Ok(players)
    }

    /// Clear all data from the database (useful for starting fresh)
    pub fn clear_all_data(&self) -> Result<()> {
        // Children first due to foreign keys
        self.conn().execute_batch(
            "DELETE FROM assignments;
             DELETE FROM players;
             DELETE FROM positions;
             DELETE FROM teams;
             DELETE FROM sports;",
        )?;
        Ok(())
    }
}

impl EntityResolver for DepthChartDatabase {
    fn resolve_position(&self, team_id: TeamId, name: &str) -> Result<Option<PositionId>> {
        let conn = self.conn();
        ensure_team(&conn, team_id)?;
        let id = conn
            .query_row(
                "SELECT position_id FROM positions WHERE team_id = ? AND name = ?",
                params![team_id.as_i64(), name],
                |row| row.get::<_, i64>(0),
            )
            .optional()?;
        debug!("Resolved position {} on team {} to {:?}", name, team_id, id);
        Ok(id.map(PositionId::new))
    }

    fn resolve_player(&self, team_id: TeamId, number: PlayerNumber) -> Result<Option<PlayerId>> {
        let conn = self.conn();
        ensure_team(&conn, team_id)?;
        let id = conn
            .query_row(
                "SELECT player_id FROM players WHERE team_id = ? AND number = ?",
                params![team_id.as_i64(), number.as_u32()],
                |row| row.get::<_, i64>(0),
            )
            .optional()?;
        debug!("Resolved player {} on team {} to {:?}", number, team_id, id);
        Ok(id.map(PlayerId::new))
    }
}

pub(crate) fn team_exists(conn: &Connection, team_id: TeamId) -> Result<bool> {
    let found = conn
        .query_row(
            "SELECT 1 FROM teams WHERE team_id = ?",
            params![team_id.as_i64()],
            |_| Ok(()),
        )
        .optional()?;
    Ok(found.is_some())
}

fn ensure_team(conn: &Connection, team_id: TeamId) -> Result<()> {
    if team_exists(conn, team_id)? {
        Ok(())
    } else {
        Err(DepthChartError::not_found("team", team_id))
    }
}

pub(crate) fn row_to_team(row: &Row) -> rusqlite::Result<Team> {
    Ok(Team {
        team_id: TeamId::new(row.get(0)?),
        sport_id: SportId::new(row.get(1)?),
        name: row.get(2)?,
    })
}

pub(crate) fn row_to_position(row: &Row) -> rusqlite::Result<Position> {
    Ok(Position {
        position_id: PositionId::new(row.get(0)?),
        team_id: TeamId::new(row.get(1)?),
        name: row.get(2)?,
    })
}

/// Expects columns `player_id, team_id, number, name, odds` starting at 0
pub(crate) fn row_to_player(row: &Row) -> rusqlite::Result<Player> {
    player_at(row, 0)
}

pub(crate) fn player_at(row: &Row, offset: usize) -> rusqlite::Result<Player> {
    Ok(Player {
        player_id: PlayerId::new(row.get(offset)?),
        team_id: TeamId::new(row.get(offset + 1)?),
        number: PlayerNumber::new(row.get(offset + 2)?),
        name: row.get(offset + 3)?,
        odds: row.get(offset + 4)?,
    })
}
