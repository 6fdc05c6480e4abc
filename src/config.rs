//! Build-time constants and the shipped arcade configuration.
//!
//! The configuration is embedded in `index.html` as a JSON script element and
//! validated once at startup. Anything invalid about the sequence itself is
//! fatal; a malformed document only falls back to defaults.

use serde::Deserialize;

use crate::registry::{Catalog, MinigameId};
use crate::sequence::SequenceMode;

/// How long each minigame runs before the "NEXT!" banner.
pub const PLAY_DURATION_MS: f64 = 6000.0;
/// How long the "NEXT!" banner stays up.
pub const TRANSITION_DURATION_MS: f64 = 2000.0;
/// The objective banner is shown for the first part of each minigame.
pub const OBJECTIVE_BANNER_MS: f64 = 1100.0;
/// Fixed simulation rate for per-minigame motion.
pub const TICKS_PER_SEC: u32 = 60;
/// Volume of per-minigame background beds.
pub const BED_VOLUME: f32 = 0.45;
/// Volume of the "NEXT!" sting.
pub const NEXT_CUE_VOLUME: f32 = 0.1;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("the minigame catalog is empty")]
    EmptyCatalog,
    #[error("unknown minigame id {0}")]
    UnknownMinigame(u8),
    #[error("minigame id {0} is listed more than once")]
    DuplicateMinigame(u8),
    #[error("random sequencing needs at least two minigames, catalog has {0}")]
    RandomNeedsTwo(usize),
    #[error("{name} must be positive, got {value}")]
    NonPositiveDuration { name: &'static str, value: f64 },
    #[error("malformed config: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub sequence_mode: SequenceMode,
    /// Show the title screen before the first minigame.
    pub start_screen: bool,
    pub play_duration_ms: f64,
    pub transition_duration_ms: f64,
    /// Minigame ids in play order.
    pub catalog: Vec<u8>,
    /// Fixed RNG seed; `None` lets the host pick one.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sequence_mode: SequenceMode::Sequential,
            start_screen: true,
            play_duration_ms: PLAY_DURATION_MS,
            transition_duration_ms: TRANSITION_DURATION_MS,
            catalog: MinigameId::all().map(MinigameId::get).collect(),
            seed: None,
        }
    }
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check the durations and build the ordered catalog.
    pub fn catalog(&self) -> Result<Catalog, ConfigError> {
        for (name, value) in [
            ("play_duration_ms", self.play_duration_ms),
            ("transition_duration_ms", self.transition_duration_ms),
        ] {
            if value.is_nan() || value <= 0.0 {
                return Err(ConfigError::NonPositiveDuration { name, value });
            }
        }
        Catalog::from_raw(&self.catalog)
    }
}
