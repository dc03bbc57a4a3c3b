//! Process-local player store for development and testing.

use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::debug;

use super::league::{League, Player};
use super::{PlayerStore, StoreError};

/// Name → wins map behind a read/write lock. Nothing is persisted.
#[derive(Debug, Default)]
pub struct InMemoryPlayerStore {
    store: RwLock<HashMap<String, u64>>,
}

impl InMemoryPlayerStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PlayerStore for InMemoryPlayerStore {
    fn get_player_score(&self, name: &str) -> u64 {
        self.store.read().get(name).copied().unwrap_or(0)
    }

    fn record_win(&self, name: &str) -> Result<(), StoreError> {
        let mut store = self.store.write();
        let wins = store.entry(name.to_string()).or_insert(0);
        *wins = wins
            .checked_add(1)
            .ok_or_else(|| StoreError::Overflow(name.to_string()))?;
        debug!("Recorded win for {} (now {})", name, wins);
        Ok(())
    }

    fn get_league(&self) -> League {
        let mut league: League = self
            .store
            .read()
            .iter()
            .map(|(name, wins)| Player::new(name.clone(), *wins))
            .collect();
        league.sort_by_wins();
        league
    }
}
