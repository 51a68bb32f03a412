//! Type-safe wrappers for depth chart identifiers and ranks.

pub mod ids;
pub mod rank;

#[cfg(test)]
mod tests;

pub use ids::{PlayerId, PositionId, SportId, TeamId};
pub use rank::{PlayerNumber, Rank};
