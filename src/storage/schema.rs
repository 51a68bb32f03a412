//! Database schema and connection management

use crate::error::{DepthChartError, Result};
use dirs::data_dir;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// Database connection manager for sports, rosters and depth charts.
///
/// The connection sits behind a mutex so one database can be shared by
/// every engine instance in the process.
pub struct DepthChartDatabase {
    conn: Mutex<Connection>,
}

impl DepthChartDatabase {
    /// Open (or create) a database file at `path` and ensure tables exist
    pub fn new(path: &Path) -> Result<Self> {
        // Ensure the data directory exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        debug!("Opening depth chart database at {}", path.display());
        Self::from_connection(Connection::open(path)?)
    }

    /// Fresh in-memory database, used by tests and dry runs
    pub fn new_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        let db = Self {
            conn: Mutex::new(conn),
        };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Get the path to the default database file
    pub fn default_path() -> Result<PathBuf> {
        let data_dir = data_dir().ok_or_else(|| DepthChartError::Config {
            message: "Could not determine data directory".to_string(),
        })?;
        Ok(data_dir.join("depth-chart").join("depth_chart.db"))
    }

    /// Lock the underlying connection.
    ///
    /// A panic while the lock was held leaves no open transaction behind
    /// (sessions roll back on drop), so a poisoned lock is still usable.
    pub(crate) fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Initialize the database schema
    pub(crate) fn initialize_schema(&self) -> Result<()> {
        self.conn().execute_batch(
            "CREATE TABLE IF NOT EXISTS sports (
                sport_id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS teams (
                team_id INTEGER PRIMARY KEY AUTOINCREMENT,
                sport_id INTEGER NOT NULL,
                name TEXT NOT NULL,
                FOREIGN KEY (sport_id) REFERENCES sports(sport_id)
            );

            CREATE TABLE IF NOT EXISTS positions (
                position_id INTEGER PRIMARY KEY AUTOINCREMENT,
                team_id INTEGER NOT NULL,
                name TEXT NOT NULL,
                UNIQUE (team_id, name),
                FOREIGN KEY (team_id) REFERENCES teams(team_id)
            );

            CREATE TABLE IF NOT EXISTS players (
                player_id INTEGER PRIMARY KEY AUTOINCREMENT,
                team_id INTEGER NOT NULL,
                number INTEGER NOT NULL,
                name TEXT NOT NULL,
                odds TEXT,
                UNIQUE (team_id, number),
                FOREIGN KEY (team_id) REFERENCES teams(team_id)
            );

            CREATE TABLE IF NOT EXISTS assignments (
                position_id INTEGER NOT NULL,
                player_id INTEGER NOT NULL,
                rank INTEGER NOT NULL CHECK (rank >= 0),
                PRIMARY KEY (position_id, player_id),
                FOREIGN KEY (position_id) REFERENCES positions(position_id),
                FOREIGN KEY (player_id) REFERENCES players(player_id)
            );

            -- No two players may share a rank at one position
            CREATE UNIQUE INDEX IF NOT EXISTS idx_assignment_position_rank
                ON assignments(position_id, rank);",
        )?;

        Ok(())
    }
}
