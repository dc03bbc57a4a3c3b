//! Recording store used by front-end tests.

use parking_lot::Mutex;
use std::collections::HashMap;

use super::league::League;
use super::{PlayerStore, StoreError};

/// Serves fixed scores and league, remembers every win call.
#[derive(Debug, Default)]
pub struct StubPlayerStore {
    pub scores: HashMap<String, u64>,
    pub win_calls: Mutex<Vec<String>>,
    pub league: League,
}

impl StubPlayerStore {
    pub fn with_scores<'a>(scores: impl IntoIterator<Item = (&'a str, u64)>) -> Self {
        Self {
            scores: scores
                .into_iter()
                .map(|(name, wins)| (name.to_string(), wins))
                .collect(),
            ..Default::default()
        }
    }

    pub fn with_league(league: League) -> Self {
        Self {
            league,
            ..Default::default()
        }
    }

    pub fn win_calls(&self) -> Vec<String> {
        self.win_calls.lock().clone()
    }
}

impl PlayerStore for StubPlayerStore {
    fn get_player_score(&self, name: &str) -> u64 {
        self.scores.get(name).copied().unwrap_or(0)
    }

    fn record_win(&self, name: &str) -> Result<(), StoreError> {
        self.win_calls.lock().push(name.to_string());
        Ok(())
    }

    fn get_league(&self) -> League {
        self.league.clone()
    }
}

/// Fails every write, for exercising error paths.
#[derive(Debug, Default)]
pub struct FailingPlayerStore;

impl PlayerStore for FailingPlayerStore {
    fn get_player_score(&self, _name: &str) -> u64 {
        0
    }

    fn record_win(&self, _name: &str) -> Result<(), StoreError> {
        Err(StoreError::Write(std::io::Error::new(
            std::io::ErrorKind::Other,
            "disk full",
        )))
    }

    fn get_league(&self) -> League {
        League::new()
    }
}
