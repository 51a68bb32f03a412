//! Storage layer for the depth chart
//!
//! This module provides a clean abstraction over the SQLite database,
//! organized into logical components:
//! - `models`: Data structures
//! - `schema`: Database connection and schema management
//! - `queries`: Entity CRUD and key resolution
//! - `session`: Transactional sessions backing the ranking engine

pub mod models;
pub mod queries;
pub mod schema;
pub mod session;


// Re-export the main types and database struct for easy access
pub use models::*;
pub use schema::DepthChartDatabase;
pub use session::SqliteSession;
