//! Per-position reader/writer locks.
//!
//! Mutations of a position (insert, remove) hold its write lock for the whole
//! scan-shift-commit sequence; reads hold the read lock so they never observe
//! a half-applied shift. Distinct positions never contend.
//!
//! Lock order: position locks are always taken before a store session is
//! opened, and several position locks are taken in ascending id order.

use crate::cli::types::PositionId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

#[derive(Debug, Default)]
pub struct PositionLocks {
    locks: Mutex<HashMap<PositionId, Arc<RwLock<()>>>>,
}

impl PositionLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// The lock guarding `position_id`, created on first use
    pub fn handle(&self, position_id: PositionId) -> Arc<RwLock<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(locks.entry(position_id).or_default())
    }

    /// Handles for several positions, sorted and deduplicated by id
    pub fn handles(&self, position_ids: &[PositionId]) -> Vec<Arc<RwLock<()>>> {
        let mut ids = position_ids.to_vec();
        ids.sort();
        ids.dedup();
        ids.into_iter().map(|id| self.handle(id)).collect()
    }

    /// Forget every registered lock. Handles already held stay valid.
    pub fn clear(&self) {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Number of positions that have been locked at least once
    pub fn len(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
