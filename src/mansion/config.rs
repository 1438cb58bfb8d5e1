//! Session tunables.
//!
//! The host page may embed a JSON object; missing fields fall back to
//! defaults (`#[serde(default)]`), the same way older saves are read.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::board::eligible_cell_count;
use super::state::REQUIRED_ITEMS;

/// Upper bound on searchable areas per board when nothing else is configured.
pub const DEFAULT_MAX_SEARCHABLE_AREAS: usize = 9;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Boards get between 3 and this many searchable areas (inclusive).
    pub max_searchable_areas: usize,
    /// Fixed RNG seed. `None` lets the host supply one.
    pub seed: Option<u64>,
    /// Log item placement and a board dump at debug level.
    pub reveal_items: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_searchable_areas: DEFAULT_MAX_SEARCHABLE_AREAS,
            seed: None,
            reveal_items: false,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid session config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("max_searchable_areas must be within {min}..={max}, got {actual}")]
    SearchableAreaRange {
        min: usize,
        max: usize,
        actual: usize,
    },
}

impl SessionConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SessionConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// The board must fit every required item, and cannot offer more
    /// searchable areas than it has eligible rooms.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let min = REQUIRED_ITEMS.len();
        let max = eligible_cell_count();
        if !(min..=max).contains(&self.max_searchable_areas) {
            return Err(ConfigError::SearchableAreaRange {
                min,
                max,
                actual: self.max_searchable_areas,
            });
        }
        Ok(())
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
