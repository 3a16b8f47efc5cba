//! In-memory PlayerStore implementation for tests and local runs.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use game_core::{Player, PlayerId};

use crate::repository::{PlayerStore, RepositoryError, Result};

/// In-memory implementation of PlayerStore.
pub struct InMemoryPlayerStore {
    players: RwLock<HashMap<PlayerId, Player>>,
}

impl InMemoryPlayerStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            players: RwLock::new(HashMap::new()),
        }
    }

    /// Create a store seeded with the given profiles.
    pub fn with_players(players: impl IntoIterator<Item = Player>) -> Self {
        Self {
            players: RwLock::new(players.into_iter().map(|p| (p.id, p)).collect()),
        }
    }

    /// Insert or replace a profile.
    pub fn insert(&self, player: Player) -> Result<()> {
        let mut players = self
            .players
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        players.insert(player.id, player);
        Ok(())
    }
}

impl Default for InMemoryPlayerStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlayerStore for InMemoryPlayerStore {
    async fn get_by_id(&self, id: PlayerId) -> Result<Option<Player>> {
        let players = self
            .players
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(players.get(&id).cloned())
    }

    async fn update(&self, id: PlayerId, player: &Player) -> Result<bool> {
        let mut players = self
            .players
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        match players.get_mut(&id) {
            Some(slot) => {
                *slot = player.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
