//! In-memory LevelStore implementation.

use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;
use game_core::Level;

use crate::repository::{LevelStore, RepositoryError, Result};

/// Levels keyed by order number.
///
/// NPCs are stored inline on each [`Level`], so lookups return them already
/// resolved.
pub struct InMemoryLevelStore {
    levels: RwLock<BTreeMap<u32, Level>>,
}

impl InMemoryLevelStore {
    pub fn new() -> Self {
        Self {
            levels: RwLock::new(BTreeMap::new()),
        }
    }

    pub fn with_levels(levels: impl IntoIterator<Item = Level>) -> Self {
        Self {
            levels: RwLock::new(levels.into_iter().map(|l| (l.order_number, l)).collect()),
        }
    }

    pub fn insert(&self, level: Level) -> Result<()> {
        let mut levels = self
            .levels
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        levels.insert(level.order_number, level);
        Ok(())
    }
}

impl Default for InMemoryLevelStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LevelStore for InMemoryLevelStore {
    async fn get_by_order_number(&self, order_number: u32) -> Result<Option<Level>> {
        let levels = self
            .levels
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(levels.get(&order_number).cloned())
    }

    async fn total_count(&self) -> Result<u32> {
        let levels = self
            .levels
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(levels.len() as u32)
    }
}
