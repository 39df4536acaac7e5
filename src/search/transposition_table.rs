//! Score memo keyed by a 64-bit hash of the canonical position string.
//!
//! Keys are built by the searcher from the board, the player state and,
//! under `KeyPolicy::PositionAndDepth`, the remaining depth. Without the
//! depth a shallow result can answer a deeper probe of the same position.

use std::collections::HashMap;
use std::fmt;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::str::FromStr;

use crate::chess_errors::ChessError;
use crate::game_state::chess_types::Scores;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeyPolicy {
    #[default]
    PositionAndDepth,
    PositionOnly,
}

impl FromStr for KeyPolicy {
    type Err = ChessError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "depth" | "position_and_depth" => Ok(KeyPolicy::PositionAndDepth),
            "position" | "position_only" => Ok(KeyPolicy::PositionOnly),
            _ => Err(ChessError::InvalidOption {
                name: "TranspositionKey".into(),
                value: value.into(),
            }),
        }
    }
}

impl fmt::Display for KeyPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyPolicy::PositionAndDepth => f.write_str("depth"),
            KeyPolicy::PositionOnly => f.write_str("position"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TTStats {
    pub probes: u64,
    pub hits: u64,
    pub stores: u64,
}

/// Hashes a canonical key into a table key.
#[inline]
pub fn key_hash(key: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    hasher.finish()
}

#[derive(Debug, Clone, Default)]
pub struct TranspositionTable {
    entries: HashMap<u64, Scores>,
    stats: TTStats,
}

impl TranspositionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity),
            stats: TTStats::default(),
        }
    }

    #[inline]
    pub fn stats(&self) -> TTStats {
        self.stats
    }

    pub fn probe(&mut self, key: u64) -> Option<Scores> {
        self.stats.probes += 1;
        let hit = self.entries.get(&key).copied();
        if hit.is_some() {
            self.stats.hits += 1;
        }
        hit
    }

    pub fn store(&mut self, key: u64, scores: Scores) {
        self.stats.stores += 1;
        self.entries.insert(key, scores);
    }
}
