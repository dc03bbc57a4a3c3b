//! Player score storage.
//!
//! Two back-ends implement [`PlayerStore`]:
//!
//! * **FileSystemPlayerStore** – JSON snapshot on disk, rewritten in full on every win.
//! * **InMemoryPlayerStore** – process-local map, nothing survives a restart.

use anyhow::{Context, Result};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use crate::settings::StorageConfig;

pub mod file_system;
pub mod in_memory;
pub mod league;
pub mod tape;

#[cfg(test)]
pub(crate) mod stub;

pub use file_system::FileSystemPlayerStore;
pub use in_memory::InMemoryPlayerStore;
pub use league::{League, Player};
pub use tape::{Tape, Truncate};

/// Read/write access to player scores, shared by every front end.
pub trait PlayerStore: Send + Sync {
    /// Wins recorded for `name`.
    ///
    /// Returns `0` both for unknown players and for known players without wins;
    /// callers cannot tell the two apart from this call.
    fn get_player_score(&self, name: &str) -> u64;

    /// Record a single win for `name`, adding the player if needed.
    fn record_win(&self, name: &str) -> Result<(), StoreError>;

    /// All players, sorted by wins in descending order.
    fn get_league(&self) -> League;
}

/// Errors raised by the store back-ends.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("problem opening player db file {path:?}, {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("problem getting file information from player db file, {0}")]
    Inspect(#[source] io::Error),

    #[error("problem initialising player db file, {0}")]
    Initialise(#[source] io::Error),

    #[error("problem parsing league, {0}")]
    Parse(String),

    #[error("problem writing league to player db file, {0}")]
    Write(#[source] io::Error),

    #[error("win count for {0} is already at its maximum")]
    Overflow(String),
}

/// Build the back-end selected by `config`.
pub fn open(config: &StorageConfig) -> Result<Arc<dyn PlayerStore>> {
    match config.backend.as_str() {
        "memory" => {
            info!("Using in-memory player store");
            Ok(Arc::new(InMemoryPlayerStore::new()))
        }
        "file" => {
            info!("Using file system player store at {:?}", config.path);
            let store = FileSystemPlayerStore::open(&config.path)
                .with_context(|| format!("failed to load player store from {:?}", config.path))?
                .with_sync(config.sync_on_write);
            Ok(Arc::new(store))
        }
        other => Err(anyhow::anyhow!("Unknown storage backend: {}", other)),
    }
}
