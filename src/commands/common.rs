//! Common utilities and helper functions shared across commands.

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::{
    cli::types::TeamId,
    config::AppConfig,
    depth::{DepthChartService, PositionLocks},
    storage::DepthChartDatabase,
    Result,
};

/// Context containing common resources needed by every command
pub struct CommandContext {
    pub config: AppConfig,
    pub db: DepthChartDatabase,
    pub locks: PositionLocks,
}

impl CommandContext {
    /// Load configuration and open the database it points at
    pub fn new(db_path: Option<&Path>, config_path: Option<&Path>) -> Result<Self> {
        let config = AppConfig::load(config_path)?;
        let path = config.resolve_database_path(db_path)?;
        debug!("Connecting to database at {}", path.display());
        let db = DepthChartDatabase::new(&path)?;
        Ok(Self::with_database(config, db))
    }

    /// Context over an already opened database
    pub fn with_database(config: AppConfig, db: DepthChartDatabase) -> Self {
        Self {
            config,
            db,
            locks: PositionLocks::new(),
        }
    }

    pub fn service(&self) -> DepthChartService<'_, DepthChartDatabase> {
        DepthChartService::new(&self.db, &self.locks, self.config.duplicate_policy)
    }

    pub fn team_id(&self, team_id: Option<TeamId>) -> Result<TeamId> {
        self.config.resolve_team_id(team_id, &self.db)
    }
}

/// Write one line per entry
pub fn write_lines(out: &mut impl Write, lines: &[String]) -> Result<()> {
    for line in lines {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

/// Write a value as pretty JSON
pub fn write_json<T: Serialize>(out: &mut impl Write, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
