//! The league: every known player and their win count.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::Read;

use super::StoreError;

/// A named player and the number of wins recorded for them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Player {
    pub name: String,
    pub wins: u64,
}

impl Player {
    pub fn new(name: impl Into<String>, wins: u64) -> Self {
        Self {
            name: name.into(),
            wins,
        }
    }
}

/// Ordered collection of players with unique names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct League(Vec<Player>);

impl League {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Decode a league from a JSON array of `{"Name", "Wins"}` objects.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, StoreError> {
        let players: Vec<Player> =
            serde_json::from_reader(reader).map_err(|e| StoreError::Parse(e.to_string()))?;

        let mut seen = HashSet::with_capacity(players.len());
        for player in &players {
            if !seen.insert(player.name.as_str()) {
                return Err(StoreError::Parse(format!(
                    "duplicate player {:?}",
                    player.name
                )));
            }
        }

        Ok(Self(players))
    }

    /// Mutable lookup by name, so wins can be bumped in place.
    pub fn find(&mut self, name: &str) -> Option<&mut Player> {
        self.0.iter_mut().find(|p| p.name == name)
    }

    pub fn get(&self, name: &str) -> Option<&Player> {
        self.0.iter().find(|p| p.name == name)
    }

    /// Append a player. Callers check [`League::find`] first; names stay unique.
    pub fn push(&mut self, player: Player) {
        debug_assert!(self.get(&player.name).is_none());
        self.0.push(player);
    }

    /// Sort by wins, most first.
    pub fn sort_by_wins(&mut self) {
        self.0.sort_by(|a, b| b.wins.cmp(&a.wins));
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Player> {
        self.0.iter()
    }

    pub fn into_players(self) -> Vec<Player> {
        self.0
    }
}

impl From<Vec<Player>> for League {
    fn from(players: Vec<Player>) -> Self {
        Self(players)
    }
}

impl FromIterator<Player> for League {
    fn from_iter<I: IntoIterator<Item = Player>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a League {
    type Item = &'a Player;
    type IntoIter = std::slice::Iter<'a, Player>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
