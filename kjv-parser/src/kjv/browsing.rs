//! Browsing facade
//!
//! Read-only queries over an extracted [`Bible`] held in memory: list books,
//! chapters and verses, and case-insensitive substring search. Unknown books
//! and chapters yield empty results, never errors.

use crate::kjv::bible::{Bible, VerseMap};
use crate::kjv::store::{PersistenceError, StoreRegistry};
use serde::Serialize;
use std::path::Path;

/// Search results are capped at this many hits unless configured otherwise.
pub const DEFAULT_MAX_RESULTS: usize = 50;

static NO_VERSES: VerseMap = VerseMap::new();

/// One verse matching a search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub book: String,
    pub chapter: String,
    pub verse: String,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct Browser {
    bible: Bible,
    max_results: usize,
}

impl Browser {
    pub fn new(bible: Bible) -> Self {
        Browser {
            bible,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }

    /// Load a persisted store in full.
    pub fn from_store(
        path: &Path,
        registry: &StoreRegistry,
        format: &str,
    ) -> Result<Self, PersistenceError> {
        Ok(Self::new(registry.read(path, format)?))
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn max_results(&self) -> usize {
        self.max_results
    }

    pub fn bible(&self) -> &Bible {
        &self.bible
    }

    pub fn list_books(&self) -> &[String] {
        self.bible.books()
    }

    /// Chapter labels of `book` in numeric order.
    pub fn list_chapters(&self, book: &str) -> Vec<&str> {
        self.bible
            .book(book)
            .map(|chapters| chapters.keys().map(|label| label.as_str()).collect())
            .unwrap_or_default()
    }

    pub fn list_verses(&self, book: &str, chapter: &str) -> &VerseMap {
        self.bible.chapter(book, chapter).unwrap_or(&NO_VERSES)
    }

    /// Verses containing `query`, ignoring case, in reading order.
    pub fn search_substring(&self, query: &str) -> Vec<SearchHit> {
        if query.trim().is_empty() {
            return Vec::new();
        }
        let needle = query.to_lowercase();

        self.bible
            .iter_verses()
            .filter(|(_, _, _, text)| text.to_lowercase().contains(&needle))
            .take(self.max_results)
            .map(|(book, chapter, verse, text)| SearchHit {
                book: book.to_string(),
                chapter: chapter.to_string(),
                verse: verse.to_string(),
                text: text.trim_end_matches('\r').to_string(),
            })
            .collect()
    }
}
