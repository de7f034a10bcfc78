//! Document loading utilities
//!
//! `DocumentLoader` reads the source text dump from a file or a string and
//! hands its lines to the extractor in document order.
//!
//! Text exports usually carry front matter (title pages, prefaces, tables of
//! contents) ahead of the scripture itself. When a start marker is set, the
//! loader drops everything before its first occurrence; the first line
//! handed out begins at the marker. A missing marker means the dump is not
//! what we expect and loading fails with [`SourceFormatError`].

use std::fmt;
use std::fs;
use std::path::Path;
use tracing::debug;

/// The opening words of Genesis in the King James Version.
pub const DEFAULT_START_MARKER: &str = "In the beginning God created";

/// The start marker was not found in the source text.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFormatError {
    pub marker: String,
}

impl fmt::Display for SourceFormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Could not find start of text (marker '{}' not present)",
            self.marker
        )
    }
}

impl std::error::Error for SourceFormatError {}

/// Error that can occur when loading documents
#[derive(Debug, Clone, PartialEq)]
pub enum LoaderError {
    /// IO error when reading file
    Io(String),
    /// The source does not look like a Bible text dump
    SourceFormat(SourceFormatError),
}

impl fmt::Display for LoaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoaderError::Io(msg) => write!(f, "IO error: {}", msg),
            LoaderError::SourceFormat(err) => write!(f, "Source format error: {}", err),
        }
    }
}

impl std::error::Error for LoaderError {}

impl From<std::io::Error> for LoaderError {
    fn from(err: std::io::Error) -> Self {
        LoaderError::Io(err.to_string())
    }
}

impl From<SourceFormatError> for LoaderError {
    fn from(err: SourceFormatError) -> Self {
        LoaderError::SourceFormat(err)
    }
}

/// Source text plus an optional start marker
#[derive(Debug, Clone)]
pub struct DocumentLoader {
    source: String,
    start_marker: Option<String>,
}

impl DocumentLoader {
    /// Load from a file path, using the default start marker
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LoaderError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path)
            .map_err(|e| LoaderError::Io(format!("{}: {}", path.display(), e)))?;
        Ok(Self::from_string(source))
    }

    /// Load from a string, using the default start marker
    pub fn from_string<S: Into<String>>(source: S) -> Self {
        DocumentLoader {
            source: source.into(),
            start_marker: Some(DEFAULT_START_MARKER.to_string()),
        }
    }

    /// Replace the start marker. `None` or an empty marker keeps the whole source.
    pub fn with_start_marker<S: Into<String>>(mut self, marker: Option<S>) -> Self {
        self.start_marker = marker.map(Into::into).filter(|m| !m.is_empty());
        self
    }

    pub fn start_marker(&self) -> Option<&str> {
        self.start_marker.as_deref()
    }

    /// Get the raw source string
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The part of the source extraction should see.
    pub fn body(&self) -> Result<&str, SourceFormatError> {
        match &self.start_marker {
            None => Ok(&self.source),
            Some(marker) => {
                let start = self.source.find(marker.as_str()).ok_or_else(|| SourceFormatError {
                    marker: marker.clone(),
                })?;
                debug!(offset = start, marker = %marker, "found start of text");
                Ok(&self.source[start..])
            }
        }
    }

    /// Lines of the body, in document order, without their line endings.
    pub fn lines(&self) -> Result<std::str::Lines<'_>, SourceFormatError> {
        Ok(self.body()?.lines())
    }
}
