//! Depth chart core
//!
//! - `store`: contracts for the record store and entity resolver
//! - `engine`: rank-ordered insert, remove and backups per position
//! - `chart`: team-wide chart assembly and display lines
//! - `locks`: per-position reader/writer locks
//! - `service`: name/number keyed façade over the engine

pub mod chart;
pub mod engine;
pub mod locks;
pub mod service;
pub mod store;

#[cfg(test)]
mod tests;

pub use chart::{DepthChart, PositionChart, NO_LIST};
pub use engine::{DuplicatePolicy, RankingEngine};
pub use locks::PositionLocks;
pub use service::DepthChartService;
pub use store::{EntityResolver, RecordSession, RecordStore};
