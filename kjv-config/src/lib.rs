//! Shared configuration loader for the kjv toolchain.
//!
//! `defaults/kjv.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`KjvConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use kjv_parser::kjv::canon::{Canon, CanonError};
use kjv_parser::kjv::extraction::ClassifierRules;
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/kjv.default.toml");

/// Top-level configuration consumed by kjv applications.
#[derive(Debug, Clone, Deserialize)]
pub struct KjvConfig {
    pub extract: ExtractConfig,
    pub search: SearchConfig,
    pub store: StoreConfig,
}

/// Knobs for turning a text dump into structure.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractConfig {
    pub start_marker: String,
    pub max_chapter: u64,
    pub min_verse_text_chars: usize,
    pub progress_interval: usize,
    /// Canon override; the KJV books when absent.
    #[serde(default)]
    pub books: Option<Vec<String>>,
}

impl ExtractConfig {
    pub fn classifier_rules(&self) -> ClassifierRules {
        ClassifierRules {
            max_chapter: self.max_chapter,
            min_verse_text_chars: self.min_verse_text_chars,
        }
    }

    pub fn canon(&self) -> Result<Canon, CanonError> {
        match &self.books {
            Some(books) => Canon::new(books.iter().cloned()),
            None => Ok(Canon::kjv()),
        }
    }

    /// The marker to search for, or `None` when disabled.
    pub fn start_marker(&self) -> Option<&str> {
        Some(self.start_marker.as_str()).filter(|m| !m.is_empty())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    pub max_results: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    pub format: String,
    pub pretty: bool,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<KjvConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<KjvConfig, ConfigError> {
    Loader::new().build()
}
