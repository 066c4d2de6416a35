use super::heuristics::Heuristic;
use crate::core::perception::SubRingStrategy;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_MIN_CHAIN_LENGTH: usize = 3;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for '{parameter}': {reason}")]
    InvalidParameter {
        parameter: &'static str,
        reason: String,
    },

    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisConfig {
    /// Ranking strategies for traversal priority, applied in order.
    pub heuristics: Vec<Heuristic>,
    /// Subring decomposition requested from the toolkit.
    pub subring_strategy: SubRingStrategy,
    /// Shortest aliphatic chain accepted as a unit.
    pub min_chain_length: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            heuristics: vec![Heuristic::Kind, Heuristic::Weight],
            subring_strategy: SubRingStrategy::default(),
            min_chain_length: DEFAULT_MIN_CHAIN_LENGTH,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct FileConfig {
    heuristics: Option<Vec<Heuristic>>,
    subring_strategy: Option<SubRingStrategy>,
    min_chain_length: Option<usize>,
}

impl AnalysisConfig {
    /// Loads a configuration from a TOML file; absent keys take their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let file: FileConfig = toml::from_str(&content).map_err(|e| ConfigError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;

        let mut builder = AnalysisConfigBuilder::new();
        if let Some(heuristics) = file.heuristics {
            builder = builder.heuristics(heuristics);
        }
        if let Some(strategy) = file.subring_strategy {
            builder = builder.subring_strategy(strategy);
        }
        if let Some(length) = file.min_chain_length {
            builder = builder.min_chain_length(length);
        }
        builder.build()
    }
}

#[derive(Default)]
pub struct AnalysisConfigBuilder {
    heuristics: Option<Vec<Heuristic>>,
    subring_strategy: Option<SubRingStrategy>,
    min_chain_length: Option<usize>,
}

impl AnalysisConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn heuristics(mut self, heuristics: Vec<Heuristic>) -> Self {
        self.heuristics = Some(heuristics);
        self
    }
    pub fn subring_strategy(mut self, strategy: SubRingStrategy) -> Self {
        self.subring_strategy = Some(strategy);
        self
    }
    pub fn min_chain_length(mut self, length: usize) -> Self {
        self.min_chain_length = Some(length);
        self
    }

    pub fn build(self) -> Result<AnalysisConfig, ConfigError> {
        let defaults = AnalysisConfig::default();
        let heuristics = self.heuristics.unwrap_or(defaults.heuristics);
        if heuristics.is_empty() {
            return Err(ConfigError::InvalidParameter {
                parameter: "heuristics",
                reason: "at least one heuristic is required".to_string(),
            });
        }
        let min_chain_length = self.min_chain_length.unwrap_or(defaults.min_chain_length);
        if min_chain_length < DEFAULT_MIN_CHAIN_LENGTH {
            return Err(ConfigError::InvalidParameter {
                parameter: "min_chain_length",
                reason: format!(
                    "chains need at least {} atoms, got {}",
                    DEFAULT_MIN_CHAIN_LENGTH, min_chain_length
                ),
            });
        }
        Ok(AnalysisConfig {
            heuristics,
            subring_strategy: self.subring_strategy.unwrap_or(defaults.subring_strategy),
            min_chain_length,
        })
    }
}
