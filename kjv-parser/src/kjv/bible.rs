//! Extracted Bible structure
//!
//!     A `Bible` is the output of extraction and the input of browsing:
//!
//!         books: ["Genesis", "Exodus", ...]                   encounter order
//!         bible: { book: { chapter: { verse: text } } }
//!
//!     Chapter and verse keys are kept exactly as they appeared in the source
//!     (`"3"`, `"007"`), wrapped in a [`Label`] that orders numerically so that
//!     listings come out in reading order rather than `1, 10, 2`.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

/// A chapter or verse key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Label(String);

impl Label {
    pub fn new(value: impl Into<String>) -> Self {
        Label(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn is_numeric(&self) -> bool {
        !self.0.is_empty() && self.0.bytes().all(|b| b.is_ascii_digit())
    }

    /// The digits with leading zeros removed. Non-numeric labels are returned as-is.
    fn significant(&self) -> &str {
        if self.is_numeric() {
            let stripped = self.0.trim_start_matches('0');
            if stripped.is_empty() {
                "0"
            } else {
                stripped
            }
        } else {
            &self.0
        }
    }
}

impl Ord for Label {
    fn cmp(&self, other: &Self) -> Ordering {
        // Numeric labels sort before anything else, by value then by spelling.
        match (self.is_numeric(), other.is_numeric()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (true, true) => {
                let (a, b) = (self.significant(), other.significant());
                a.len()
                    .cmp(&b.len())
                    .then_with(|| a.cmp(b))
                    .then_with(|| self.0.cmp(&other.0))
            }
            (false, false) => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for Label {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Label {
    fn from(value: &str) -> Self {
        Label(value.to_string())
    }
}

impl From<String> for Label {
    fn from(value: String) -> Self {
        Label(value)
    }
}

/// Verse label → verse text
pub type VerseMap = BTreeMap<Label, String>;

/// Chapter label → verses
pub type ChapterMap = BTreeMap<Label, VerseMap>;

/// Strip trailing carriage returns, then surrounding whitespace.
pub fn clean_verse_text(text: &str) -> String {
    text.trim_end_matches('\r').trim().to_string()
}

/// The structured text: encountered book order plus the nested mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bible {
    books: Vec<String>,
    #[serde(rename = "bible")]
    content: BTreeMap<String, ChapterMap>,
}

impl Bible {
    pub fn new() -> Self {
        Self::default()
    }

    /// A Bible holding only `book` with an empty chapter 1.
    pub fn starting_with(book: &str) -> Self {
        let mut bible = Self::new();
        bible.open_book(book);
        bible
    }

    /// Books in the order they were first encountered.
    pub fn books(&self) -> &[String] {
        &self.books
    }

    pub fn book(&self, name: &str) -> Option<&ChapterMap> {
        self.content.get(name)
    }

    pub fn chapter(&self, book: &str, chapter: &str) -> Option<&VerseMap> {
        self.book(book)?.get(&Label::from(chapter))
    }

    pub fn verse(&self, book: &str, chapter: &str, verse: &str) -> Option<&str> {
        self.chapter(book, chapter)?
            .get(&Label::from(verse))
            .map(String::as_str)
    }

    pub fn contains_book(&self, name: &str) -> bool {
        self.content.contains_key(name)
    }

    pub fn chapter_count(&self) -> usize {
        self.content.values().map(|chapters| chapters.len()).sum()
    }

    pub fn verse_count(&self) -> usize {
        self.content
            .values()
            .flat_map(|chapters| chapters.values())
            .map(|verses| verses.len())
            .sum()
    }

    /// Register `book` if unseen, with an empty chapter 1. Returns true if it was new.
    pub fn open_book(&mut self, book: &str) -> bool {
        if self.content.contains_key(book) {
            return false;
        }
        let mut chapters = ChapterMap::new();
        chapters.insert(Label::from("1"), VerseMap::new());
        self.content.insert(book.to_string(), chapters);
        self.books.push(book.to_string());
        true
    }

    /// Make sure `book`/`chapter` exists.
    pub fn open_chapter(&mut self, book: &str, chapter: &Label) {
        self.content
            .entry(book.to_string())
            .or_default()
            .entry(chapter.clone())
            .or_default();
    }

    /// Store a verse, cleaning its text. An existing verse with the same key is replaced.
    pub fn insert_verse(&mut self, book: &str, chapter: &Label, verse: Label, text: &str) {
        if !self.content.contains_key(book) {
            self.books.push(book.to_string());
        }
        self.content
            .entry(book.to_string())
            .or_default()
            .entry(chapter.clone())
            .or_default()
            .insert(verse, clean_verse_text(text));
    }

    /// Walk every verse in book, chapter, verse order.
    pub fn iter_verses(&self) -> impl Iterator<Item = (&str, &Label, &Label, &str)> {
        self.books
            .iter()
            .filter_map(move |book| {
                self.content
                    .get(book)
                    .map(|chapters| (book.as_str(), chapters))
            })
            .flat_map(|(book, chapters)| {
                chapters.iter().flat_map(move |(chapter, verses)| {
                    verses
                        .iter()
                        .map(move |(verse, text)| (book, chapter, verse, text.as_str()))
                })
            })
    }
}
