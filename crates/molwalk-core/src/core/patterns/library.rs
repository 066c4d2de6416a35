use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

/// Named SMARTS patterns for functional-group detection.
///
/// Families are kept in name order so that candidate naming is reproducible
/// across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FunctionalGroupLibrary {
    patterns: BTreeMap<String, String>,
}

impl FunctionalGroupLibrary {
    /// Loads a library from a TOML table of `family = "SMARTS"` entries.
    pub fn load(path: &Path) -> Result<Self, LibraryLoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| LibraryLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Self::from_toml_str(&content).map_err(|e| LibraryLoadError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        let patterns: BTreeMap<String, String> = toml::from_str(content)?;
        Ok(Self { patterns })
    }

    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            patterns: pairs
                .into_iter()
                .map(|(name, smarts)| (name.to_string(), smarts.to_string()))
                .collect(),
        }
    }

    pub fn get(&self, family: &str) -> Option<&str> {
        self.patterns.get(family).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.patterns
            .iter()
            .map(|(name, smarts)| (name.as_str(), smarts.as_str()))
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

#[derive(Debug, Error)]
pub enum LibraryLoadError {
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
