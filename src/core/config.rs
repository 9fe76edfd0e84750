//! Engine configuration.
//!
//! Hosts build an `EngineConfig` at startup (or deserialize one from their
//! own config file) and hand it to `Engine::new`.

use serde::{Deserialize, Serialize};

use crate::game::{GameError, GameResult};

/// Default number of active players at which the impostor has survived.
///
/// Three means the impostor plus two apples: a vote between the last two
/// apples can no longer reach the impostor.
pub const DEFAULT_FINAL_SURVIVORS: usize = 3;

/// Engine-wide settings.
///
/// ```
/// use apple_orange::core::EngineConfig;
///
/// let config = EngineConfig::default().with_seed(42);
/// assert_eq!(config.seed, Some(42));
/// assert_eq!(config.final_survivors, 3);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Seed for the engine RNG. `None` seeds from OS entropy.
    pub seed: Option<u64>,

    /// Active-player count at (or below) which the impostor wins by survival.
    pub final_survivors: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: None,
            final_survivors: DEFAULT_FINAL_SURVIVORS,
        }
    }
}

impl EngineConfig {
    /// Fix the RNG seed (builder pattern).
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the survival threshold (builder pattern).
    #[must_use]
    pub fn with_final_survivors(mut self, count: usize) -> Self {
        self.final_survivors = count;
        self
    }

    /// Reject settings the rules cannot work with.
    pub fn validate(&self) -> GameResult<()> {
        if self.final_survivors < 2 {
            return Err(GameError::InvalidConfig(format!(
                "final_survivors must be at least 2, got {}",
                self.final_survivors
            )));
        }
        Ok(())
    }
}
