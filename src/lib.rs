//! Sports Team Depth Chart Library
//!
//! Tracks, per team and per playing position, the ranked list of players
//! eligible for that position, and answers the questions coaches ask of it.
//!
//! ## Features
//!
//! - **Ranked Insert**: add a player at any rank; everyone at or below moves down
//! - **Compacting Remove**: remove a player; everyone below moves up
//! - **Backups**: the players ranked below a given player, nearest first
//! - **Full Chart**: every position of a team with its ordered players
//! - **SQLite Storage**: transactional record store with per-position locking
//! - **Bulk Import**: load sports, teams, rosters and charts from JSON
//!
//! ## Quick Start
//!
//! ```rust
//! use depth_chart::{depth::DepthChartService, storage::DepthChartDatabase, PlayerNumber, Rank};
//! use depth_chart::depth::{DuplicatePolicy, PositionLocks};
//!
//! # fn example() -> depth_chart::Result<()> {
//! let db = DepthChartDatabase::new_in_memory()?;
//! let sport = db.insert_sport("NFL")?;
//! let team = db.insert_team(sport, "Tampa Bay Buccaneers")?;
//! db.insert_position(team, "QB")?;
//! db.insert_player(team, PlayerNumber::new(12), "Tom Brady", None)?;
//! db.insert_player(team, PlayerNumber::new(11), "Blaine Gabbert", None)?;
//!
//! let locks = PositionLocks::new();
//! let service = DepthChartService::new(&db, &locks, DuplicatePolicy::Reject);
//! service.add_player(team, "QB", PlayerNumber::new(11), None)?;
//! service.add_player(team, "QB", PlayerNumber::new(12), Some(Rank::STARTER))?;
//!
//! let backups = service.backups(team, "QB", PlayerNumber::new(12))?;
//! assert_eq!(backups[0].name, "Blaine Gabbert");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Environment Configuration
//!
//! ```bash
//! export DEPTH_CHART_DB=/path/to/depth_chart.db
//! export DEPTH_CHART_TEAM_ID=1
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod depth;
pub mod error;
pub mod logging;
pub mod storage;

// Re-export commonly used types
pub use cli::types::{PlayerId, PlayerNumber, PositionId, Rank, SportId, TeamId};
pub use error::{DepthChartError, Result};

pub const DB_PATH_ENV_VAR: &str = "DEPTH_CHART_DB";
pub const TEAM_ID_ENV_VAR: &str = "DEPTH_CHART_TEAM_ID";
