//! Error types for the depth chart library and CLI

use crate::cli::types::ids::{PlayerId, PositionId};
use thiserror::Error;


pub type Result<T> = std::result::Result<T, DepthChartError>;

#[derive(Error, Debug)]
pub enum DepthChartError {
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    #[error("Player {player_id} already holds a rank at position {position_id}")]
    DuplicateAssignment {
        position_id: PositionId,
        player_id: PlayerId,
    },

    #[error("Depth chart invariant violated: {message}")]
    InvariantViolation { message: String },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse identifier: {0}")]
    InvalidId(#[from] std::num::ParseIntError),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Team not provided, {env_var} not set and the store does not hold exactly one team")]
    MissingTeam { env_var: String },

    #[error("Import failed: {message}")]
    Import { message: String },
}

impl DepthChartError {
    /// Shorthand for a `NotFound` error keyed by anything displayable.
    pub fn not_found(entity: &'static str, key: impl ToString) -> Self {
        DepthChartError::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    pub fn invariant(message: impl Into<String>) -> Self {
        DepthChartError::InvariantViolation {
            message: message.into(),
        }
    }

    /// True for the caller-facing "does not exist" outcome.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DepthChartError::NotFound { .. })
    }
}

impl From<toml::de::Error> for DepthChartError {
    fn from(err: toml::de::Error) -> Self {
        DepthChartError::Config {
            message: err.to_string(),
        }
    }
}
