//! Line-oriented front end: every `"<Name> wins"` line records one win.

use anyhow::{Context, Result};
use std::io::BufRead;
use std::sync::Arc;
use tracing::{info, warn};

use crate::store::PlayerStore;

const WIN_SUFFIX: &str = " wins";

/// Reads win announcements from `input` and records them in `store`.
pub struct PlayerCli<R> {
    store: Arc<dyn PlayerStore>,
    input: R,
}

impl<R: BufRead> PlayerCli<R> {
    pub fn new(store: Arc<dyn PlayerStore>, input: R) -> Self {
        Self { store, input }
    }

    /// Consume input until it runs out. Returns the number of wins recorded.
    pub fn play(&mut self) -> Result<usize> {
        let mut recorded = 0;
        let mut line = String::new();

        loop {
            line.clear();
            let read = self
                .input
                .read_line(&mut line)
                .context("failed to read win from input")?;
            if read == 0 {
                break;
            }

            let text = line.trim();
            if text.is_empty() {
                continue;
            }

            match extract_winner(text) {
                Some(winner) => {
                    self.store
                        .record_win(winner)
                        .with_context(|| format!("failed to record win for {}", winner))?;
                    info!("Recorded win for {}", winner);
                    recorded += 1;
                }
                None => warn!("Ignoring input {:?}, expected \"<Name> wins\"", text),
            }
        }

        Ok(recorded)
    }
}

/// `"Ryan wins"` → `Some("Ryan")`.
pub fn extract_winner(line: &str) -> Option<&str> {
    line.trim()
        .strip_suffix(WIN_SUFFIX)
        .map(str::trim)
        .filter(|name| !name.is_empty())
}
