//! Store formats for extracted Bibles
//!
//! The extracted structure is persisted as a nested text document
//!
//!     { "books": [...], "bible": { book: { chapter: { verse: text } } } }
//!
//! and loaded back wholesale by the browsing facade. Each format implements
//! [`StoreFormat`] and is registered by name with a [`StoreRegistry`].

use crate::kjv::bible::Bible;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::info;

/// Error that can occur while persisting or loading a Bible
#[derive(Debug, Clone, PartialEq)]
pub enum PersistenceError {
    /// Format not found in registry
    FormatNotFound(String),
    /// Error during (de)serialization
    Serialization(String),
    /// Error reading or writing the store file
    Io(String),
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistenceError::FormatNotFound(name) => write!(f, "Store format '{name}' not found"),
            PersistenceError::Serialization(msg) => write!(f, "Serialization error: {msg}"),
            PersistenceError::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<std::io::Error> for PersistenceError {
    fn from(err: std::io::Error) -> Self {
        PersistenceError::Io(err.to_string())
    }
}

/// A persisted representation of a Bible.
pub trait StoreFormat: Send + Sync {
    /// The name of this format (e.g., "json", "yaml")
    fn name(&self) -> &str;

    /// File extensions that select this format, without the dot
    fn extensions(&self) -> &[&str];

    fn serialize(&self, bible: &Bible) -> Result<String, PersistenceError>;

    fn deserialize(&self, source: &str) -> Result<Bible, PersistenceError>;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }
}

/// JSON store, pretty-printed by default
#[derive(Debug, Clone, Copy)]
pub struct JsonFormat {
    pub pretty: bool,
}

impl Default for JsonFormat {
    fn default() -> Self {
        JsonFormat { pretty: true }
    }
}

impl StoreFormat for JsonFormat {
    fn name(&self) -> &str {
        "json"
    }

    fn extensions(&self) -> &[&str] {
        &["json"]
    }

    fn serialize(&self, bible: &Bible) -> Result<String, PersistenceError> {
        let result = if self.pretty {
            serde_json::to_string_pretty(bible)
        } else {
            serde_json::to_string(bible)
        };
        result.map_err(|e| PersistenceError::Serialization(e.to_string()))
    }

    fn deserialize(&self, source: &str) -> Result<Bible, PersistenceError> {
        serde_json::from_str(source).map_err(|e| PersistenceError::Serialization(e.to_string()))
    }

    fn description(&self) -> &str {
        "JSON document with a book list and nested book/chapter/verse objects"
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct YamlFormat;

impl StoreFormat for YamlFormat {
    fn name(&self) -> &str {
        "yaml"
    }

    fn extensions(&self) -> &[&str] {
        &["yaml", "yml"]
    }

    fn serialize(&self, bible: &Bible) -> Result<String, PersistenceError> {
        serde_yaml::to_string(bible).map_err(|e| PersistenceError::Serialization(e.to_string()))
    }

    fn deserialize(&self, source: &str) -> Result<Bible, PersistenceError> {
        serde_yaml::from_str(source).map_err(|e| PersistenceError::Serialization(e.to_string()))
    }

    fn description(&self) -> &str {
        "YAML mapping with the same layout as the JSON store"
    }
}

/// Registry of store formats
pub struct StoreRegistry {
    formats: HashMap<String, Box<dyn StoreFormat>>,
}

impl StoreRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        StoreRegistry {
            formats: HashMap::new(),
        }
    }

    /// Create a registry with the built-in formats
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(JsonFormat::default());
        registry.register(YamlFormat);
        registry
    }

    /// Register a format, replacing any format with the same name.
    pub fn register<F: StoreFormat + 'static>(&mut self, format: F) {
        self.formats
            .insert(format.name().to_string(), Box::new(format));
    }

    pub fn get(&self, name: &str) -> Option<&dyn StoreFormat> {
        self.formats.get(name).map(|f| f.as_ref())
    }

    pub fn has(&self, name: &str) -> bool {
        self.formats.contains_key(name)
    }

    /// List all available format names (sorted)
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formats.keys().cloned().collect();
        names.sort();
        names
    }

    /// The format whose extensions include the extension of `path`.
    pub fn format_for_path(&self, path: &Path) -> Option<&str> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        let mut names = self.list_formats();
        names.retain(|name| {
            self.formats[name]
                .extensions()
                .iter()
                .any(|ext| *ext == extension)
        });
        let name = names.into_iter().next()?;
        self.formats.get(&name).map(|f| f.name())
    }

    fn require(&self, name: &str) -> Result<&dyn StoreFormat, PersistenceError> {
        self.get(name)
            .ok_or_else(|| PersistenceError::FormatNotFound(name.to_string()))
    }

    pub fn serialize(&self, bible: &Bible, format: &str) -> Result<String, PersistenceError> {
        self.require(format)?.serialize(bible)
    }

    pub fn deserialize(&self, source: &str, format: &str) -> Result<Bible, PersistenceError> {
        self.require(format)?.deserialize(source)
    }

    /// Serialize `bible` and write it to `path`, creating parent directories.
    pub fn write(&self, bible: &Bible, path: &Path, format: &str) -> Result<(), PersistenceError> {
        let contents = self.serialize(bible, format)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| PersistenceError::Io(format!("{}: {}", parent.display(), e)))?;
        }
        fs::write(path, contents)
            .map_err(|e| PersistenceError::Io(format!("{}: {}", path.display(), e)))?;
        info!(path = %path.display(), format, books = bible.books().len(), "store written");
        Ok(())
    }

    /// Read and deserialize the store at `path`.
    pub fn read(&self, path: &Path, format: &str) -> Result<Bible, PersistenceError> {
        let format = self.require(format)?;
        let contents = fs::read_to_string(path)
            .map_err(|e| PersistenceError::Io(format!("{}: {}", path.display(), e)))?;
        format.deserialize(&contents)
    }
}

impl Default for StoreRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
