//! Extraction pipeline
//!
//! Ties the pieces together: load the source, extract the structure, persist
//! it. The source is checked before anything is written, so a dump without
//! the start marker never produces a store file.

use crate::kjv::bible::Bible;
use crate::kjv::canon::Canon;
use crate::kjv::extraction::{ClassifierRules, Extractor};
use crate::kjv::loader::{DocumentLoader, LoaderError};
use crate::kjv::store::{PersistenceError, StoreRegistry};
use std::fmt;
use std::path::{Path, PathBuf};

/// Errors during pipeline execution
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineError {
    Source(LoaderError),
    Persistence(PersistenceError),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Source(err) => write!(f, "{}", err),
            PipelineError::Persistence(err) => write!(f, "Could not persist store: {}", err),
        }
    }
}

impl std::error::Error for PipelineError {}

impl From<LoaderError> for PipelineError {
    fn from(err: LoaderError) -> Self {
        PipelineError::Source(err)
    }
}

impl From<PersistenceError> for PipelineError {
    fn from(err: PersistenceError) -> Self {
        PipelineError::Persistence(err)
    }
}

/// Summary of a completed extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionReport {
    pub books: usize,
    pub chapters: usize,
    pub verses: usize,
    pub output: PathBuf,
    pub format: String,
}

impl fmt::Display for ExtractionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Extracted {} books, {} chapters, {} verses to {} ({})",
            self.books,
            self.chapters,
            self.verses,
            self.output.display(),
            self.format
        )
    }
}

pub struct ExtractionPipeline {
    canon: Canon,
    rules: ClassifierRules,
    progress_interval: usize,
}

impl ExtractionPipeline {
    /// KJV canon, default rules
    pub fn new() -> Self {
        Self::with_canon(Canon::kjv())
    }

    pub fn with_canon(canon: Canon) -> Self {
        ExtractionPipeline {
            canon,
            rules: ClassifierRules::default(),
            progress_interval: 1000,
        }
    }

    pub fn with_rules(mut self, rules: ClassifierRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval;
        self
    }

    pub fn canon(&self) -> &Canon {
        &self.canon
    }

    /// Extract without persisting.
    pub fn extract(&self, loader: &DocumentLoader) -> Result<Bible, PipelineError> {
        let lines = loader.lines().map_err(LoaderError::from)?;
        Ok(Extractor::with_rules(&self.canon, self.rules)
            .with_progress_interval(self.progress_interval)
            .extract(lines))
    }

    /// Extract and write the result to `output` in `format`.
    pub fn extract_to_store(
        &self,
        loader: &DocumentLoader,
        registry: &StoreRegistry,
        output: &Path,
        format: &str,
    ) -> Result<ExtractionReport, PipelineError> {
        if !registry.has(format) {
            return Err(PersistenceError::FormatNotFound(format.to_string()).into());
        }
        let bible = self.extract(loader)?;
        registry.write(&bible, output, format)?;
        Ok(ExtractionReport {
            books: bible.books().len(),
            chapters: bible.chapter_count(),
            verses: bible.verse_count(),
            output: output.to_path_buf(),
            format: format.to_string(),
        })
    }
}

impl Default for ExtractionPipeline {
    fn default() -> Self {
        Self::new()
    }
}
