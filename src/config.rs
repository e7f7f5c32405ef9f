//! Engine configuration
//!
//! Every field has a default, so a TOML file only needs the values it
//! overrides:
//!
//! ```
//! use tictactoe::{Difficulty, EngineConfig};
//!
//! let config = EngineConfig::from_toml_str(
//!     r#"
//!     time_budget_ms = 250
//!     seed = 7
//!     "#,
//! )
//! .unwrap();
//! assert_eq!(config.time_budget_ms, 250);
//! assert_eq!(config.large_board_threshold, 7);
//! assert_eq!("hard".parse::<Difficulty>().unwrap(), Difficulty::Hard);
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use clap::ValueEnum;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::board::Player;

/// Playing strength selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Mostly random, occasionally sensible
    Easy,
    /// Rule-based priority chain
    Medium,
    /// Exhaustive search where tractable
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(ConfigError::UnknownDifficulty(other.to_string())),
        }
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
    #[error("unknown difficulty '{0}' (expected easy, medium or hard)")]
    UnknownDifficulty(String),
}

/// Tunables for an [`AIEngine`](crate::AIEngine)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Wall-clock budget for iterative deepening
    pub time_budget_ms: u64,
    /// Hard plays like Medium on boards larger than this
    pub large_board_threshold: usize,
    /// Hard solves exactly once this few cells remain
    pub endgame_threshold: usize,
    /// Probability that Easy defers to Medium
    pub easy_smart_chance: f64,
    /// Probability that Easy prefers a center or corner cell
    pub easy_strategic_bias: f64,
    /// Probability that Medium plays randomly instead of heuristically
    pub medium_random_chance: f64,
    /// Side played by [`AIEngine::get_ai_move`](crate::AIEngine::get_ai_move)
    pub ai_player: Player,
    /// RNG seed; `None` seeds from entropy
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            time_budget_ms: 1000,
            large_board_threshold: 7,
            endgame_threshold: 8,
            easy_smart_chance: 0.2,
            easy_strategic_bias: 0.3,
            medium_random_chance: 0.1,
            ai_player: Player::O,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!("loading config from {}", path.display());
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Reject probabilities outside [0, 1].
    pub fn validate(&self) -> Result<(), ConfigError> {
        let chances = [
            ("easy_smart_chance", self.easy_smart_chance),
            ("easy_strategic_bias", self.easy_strategic_bias),
            ("medium_random_chance", self.medium_random_chance),
        ];
        for (name, p) in chances {
            if !(0.0..=1.0).contains(&p) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be within [0, 1], got {p}"
                )));
            }
        }
        Ok(())
    }

    /// Copy with every probability forced into [0, 1] (NaN becomes 0).
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        for p in [
            &mut self.easy_smart_chance,
            &mut self.easy_strategic_bias,
            &mut self.medium_random_chance,
        ] {
            *p = if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) };
        }
        self
    }

    #[inline]
    pub fn time_budget(&self) -> Duration {
        Duration::from_millis(self.time_budget_ms)
    }
}
