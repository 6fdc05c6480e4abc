//! Which minigame comes next.

use rand::seq::IndexedRandom;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Deserialize;

use crate::config::ConfigError;
use crate::registry::{Catalog, MinigameId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SequenceMode {
    /// Catalog order, one full pass, then the end screen.
    #[default]
    Sequential,
    /// Uniform picks that never repeat the previous id. Open-ended.
    Random,
}

pub struct SequencePolicy {
    mode: SequenceMode,
    cursor: usize,
    rng: Pcg32,
}

impl SequencePolicy {
    pub fn new(mode: SequenceMode, catalog: &Catalog, seed: u64) -> Result<Self, ConfigError> {
        if mode == SequenceMode::Random && catalog.len() < 2 {
            return Err(ConfigError::RandomNeedsTwo(catalog.len()));
        }
        Ok(Self {
            mode,
            cursor: 0,
            rng: Pcg32::seed_from_u64(seed),
        })
    }

    pub fn mode(&self) -> SequenceMode {
        self.mode
    }

    #[cfg(test)]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// First minigame of a run.
    pub fn next_for_start(&mut self, catalog: &Catalog, current: MinigameId) -> MinigameId {
        match self.mode {
            SequenceMode::Sequential => {
                self.cursor = 0;
                catalog.first()
            }
            SequenceMode::Random => self.pick_other_than(catalog, current),
        }
    }

    /// Minigame following `previous`. Sequential mode wraps; the flow
    /// controller stops at the end of a pass before asking.
    pub fn next(&mut self, catalog: &Catalog, previous: MinigameId) -> MinigameId {
        match self.mode {
            SequenceMode::Sequential => {
                self.cursor = (self.cursor + 1) % catalog.len();
                catalog.get(self.cursor).unwrap_or_else(|| catalog.first())
            }
            SequenceMode::Random => self.pick_other_than(catalog, previous),
        }
    }

    /// True when `current` closes a sequential pass.
    pub fn is_last(&self, catalog: &Catalog, current: MinigameId) -> bool {
        self.mode == SequenceMode::Sequential && current == catalog.last()
    }

    /// Move the sequential cursor onto `id` after a direct menu jump.
    ///
    /// The cursor follows the jump rather than staying put, so the pass
    /// resumes after the chosen entry instead of replaying it later.
    pub fn sync_to(&mut self, catalog: &Catalog, id: MinigameId) {
        if let Some(index) = catalog.index_of(id) {
            self.cursor = index;
        }
    }

    fn pick_other_than(&mut self, catalog: &Catalog, previous: MinigameId) -> MinigameId {
        let pool: Vec<MinigameId> = catalog
            .ids()
            .iter()
            .copied()
            .filter(|&id| id != previous)
            .collect();
        // Non-empty: Random mode is only constructed for catalogs of two or more.
        pool.choose(&mut self.rng)
            .copied()
            .unwrap_or_else(|| catalog.first())
    }
}
