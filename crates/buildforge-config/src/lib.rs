//! Configuration system for BuildForge.
//!
//! Load search tuning and scoring weights from TOML or YAML files so the
//! optimizer can be tuned without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use buildforge_config::SearchConfig;
//!
//! let config = SearchConfig::from_toml_str(r#"
//!     beam_width = 128
//!     pool_size = 24
//!
//!     [weights]
//!     melee_dps = 2.0
//!     walk_speed = 0.0
//! "#).unwrap();
//!
//! assert_eq!(config.beam_width, 128);
//! assert_eq!(config.weights().melee_dps, 2.0);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use buildforge_config::SearchConfig;
//!
//! let config = SearchConfig::load("buildforge.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::path::Path;

use buildforge_core::Weights;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Search tuning parameters.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct SearchConfig {
    /// Partial assignments kept after each slot expansion.
    pub beam_width: usize,

    /// Top-ranked candidates kept per slot (must-includes and threshold
    /// support entries come on top of this).
    pub pool_size: usize,

    /// Cap on states expanded for a single slot.
    pub max_states: usize,

    /// Enumerate every combination when the full space is at most this big.
    pub exhaustive_state_limit: u64,

    /// Number of ranked builds returned.
    pub result_limit: usize,

    /// Floor for the number of threshold-support candidates per slot.
    pub threshold_support_min: usize,

    /// Strategy override.
    pub strategy: SearchStrategy,

    /// Scoring weights; defaults apply when absent.
    pub weights: Option<Weights>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            beam_width: 64,
            pool_size: 40,
            max_states: 250_000,
            exhaustive_state_limit: 20_000,
            result_limit: 10,
            threshold_support_min: 30,
            strategy: SearchStrategy::Auto,
            weights: None,
        }
    }
}

impl SearchConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn with_beam_width(mut self, beam_width: usize) -> Self {
        self.beam_width = beam_width;
        self
    }

    pub fn with_pool_size(mut self, pool_size: usize) -> Self {
        self.pool_size = pool_size;
        self
    }

    pub fn with_max_states(mut self, max_states: usize) -> Self {
        self.max_states = max_states;
        self
    }

    pub fn with_exhaustive_state_limit(mut self, limit: u64) -> Self {
        self.exhaustive_state_limit = limit;
        self
    }

    pub fn with_result_limit(mut self, result_limit: usize) -> Self {
        self.result_limit = result_limit;
        self
    }

    pub fn with_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_weights(mut self, weights: Weights) -> Self {
        self.weights = Some(weights);
        self
    }

    /// Returns the configured weights or the defaults.
    pub fn weights(&self) -> Weights {
        self.weights.unwrap_or_default()
    }

    /// Checks that the limits describe a searchable space.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.beam_width == 0 {
            return Err(ConfigError::Invalid("beam_width must be at least 1".into()));
        }
        if self.pool_size == 0 {
            return Err(ConfigError::Invalid("pool_size must be at least 1".into()));
        }
        if self.max_states == 0 {
            return Err(ConfigError::Invalid("max_states must be at least 1".into()));
        }
        if self.result_limit == 0 {
            return Err(ConfigError::Invalid("result_limit must be at least 1".into()));
        }
        Ok(())
    }
}

/// How the optimizer explores the space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStrategy {
    /// Exhaustive below `exhaustive_state_limit`, beam search above it.
    #[default]
    Auto,

    /// Always use the pruned beam.
    Beam,

    /// Always enumerate every combination.
    Exhaustive,
}
