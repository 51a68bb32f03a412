//! Application configuration loaded from TOML
//!
//! ```toml
//! database_path = "/var/lib/depth-chart/depth_chart.db"
//! default_team = 1
//! duplicate_policy = "reposition"   # or "reject"
//! ```

use crate::cli::types::TeamId;
use crate::depth::DuplicatePolicy;
use crate::error::{DepthChartError, Result};
use crate::storage::DepthChartDatabase;
use crate::{DB_PATH_ENV_VAR, TEAM_ID_ENV_VAR};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database_path: Option<PathBuf>,
    pub default_team: Option<TeamId>,
    pub duplicate_policy: DuplicatePolicy,
}

impl AppConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Load from an explicit file, or from the default location when present.
    /// Missing default file means defaults; a missing explicit file is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from {}", path.display());
        let contents = std::fs::read_to_string(path).map_err(|e| DepthChartError::Config {
            message: format!("cannot read {}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    /// `<config_dir>/depth-chart/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("depth-chart").join("config.toml"))
    }

    /// Database path: flag, then env var, then config file, then the default
    /// data directory.
    pub fn resolve_database_path(&self, flag: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = flag {
            return Ok(path.to_path_buf());
        }
        if let Some(path) = std::env::var_os(DB_PATH_ENV_VAR).filter(|v| !v.is_empty()) {
            return Ok(PathBuf::from(path));
        }
        match &self.database_path {
            Some(path) => Ok(path.clone()),
            None => DepthChartDatabase::default_path(),
        }
    }

    /// Team for a command: explicit value, then env var, then config, then
    /// the only team in the store.
    pub fn resolve_team_id(
        &self,
        team_id: Option<TeamId>,
        db: &DepthChartDatabase,
    ) -> Result<TeamId> {
        if let Some(id) = team_id {
            return Ok(id);
        }
        if let Some(value) = std::env::var(TEAM_ID_ENV_VAR).ok().filter(|v| !v.is_empty()) {
            return value.parse();
        }
        if let Some(id) = self.default_team {
            return Ok(id);
        }

        let teams = db.list_teams()?;
        match teams.as_slice() {
            [only] => Ok(only.team_id),
            _ => Err(DepthChartError::MissingTeam {
                env_var: TEAM_ID_ENV_VAR.to_string(),
            }),
        }
    }
}
