//! Canonical book list
//!
//!     The canon is the ground truth for recognising book transitions in the
//!     source text. A line can only switch the current book if it names one of
//!     these books, compared case-insensitively. The first canonical book is
//!     where extraction starts.

use std::collections::HashSet;
use std::fmt;

/// The 66 books of the King James Version, in traditional order.
pub const KJV_BOOKS: [&str; 66] = [
    "Genesis",
    "Exodus",
    "Leviticus",
    "Numbers",
    "Deuteronomy",
    "Joshua",
    "Judges",
    "Ruth",
    "1 Samuel",
    "2 Samuel",
    "1 Kings",
    "2 Kings",
    "1 Chronicles",
    "2 Chronicles",
    "Ezra",
    "Nehemiah",
    "Esther",
    "Job",
    "Psalms",
    "Proverbs",
    "Ecclesiastes",
    "Song of Solomon",
    "Isaiah",
    "Jeremiah",
    "Lamentations",
    "Ezekiel",
    "Daniel",
    "Hosea",
    "Joel",
    "Amos",
    "Obadiah",
    "Jonah",
    "Micah",
    "Nahum",
    "Habakkuk",
    "Zephaniah",
    "Haggai",
    "Zechariah",
    "Malachi",
    "Matthew",
    "Mark",
    "Luke",
    "John",
    "Acts",
    "Romans",
    "1 Corinthians",
    "2 Corinthians",
    "Galatians",
    "Ephesians",
    "Philippians",
    "Colossians",
    "1 Thessalonians",
    "2 Thessalonians",
    "1 Timothy",
    "2 Timothy",
    "Titus",
    "Philemon",
    "Hebrews",
    "James",
    "1 Peter",
    "2 Peter",
    "1 John",
    "2 John",
    "3 John",
    "Jude",
    "Revelation",
];

/// Errors raised when building a canon
#[derive(Debug, Clone, PartialEq)]
pub enum CanonError {
    /// No books were given
    Empty,
    /// Two names are equal once case is ignored
    DuplicateBook(String),
    /// A name is empty or only whitespace
    BlankName,
}

impl fmt::Display for CanonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CanonError::Empty => write!(f, "Canon must contain at least one book"),
            CanonError::DuplicateBook(name) => {
                write!(f, "Book '{}' appears more than once in the canon", name)
            }
            CanonError::BlankName => write!(f, "Canon contains a blank book name"),
        }
    }
}

impl std::error::Error for CanonError {}

/// An ordered, immutable list of recognised book names.
#[derive(Debug, Clone, PartialEq)]
pub struct Canon {
    books: Vec<String>,
    // Upper-cased copies, index-aligned with `books`.
    keys: Vec<String>,
}

impl Canon {
    /// Build a canon from book names in order.
    pub fn new<I, S>(books: I) -> Result<Self, CanonError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let books: Vec<String> = books
            .into_iter()
            .map(|name| name.into().trim().to_string())
            .collect();
        if books.is_empty() {
            return Err(CanonError::Empty);
        }

        let mut seen = HashSet::new();
        let mut keys = Vec::with_capacity(books.len());
        for name in &books {
            if name.is_empty() {
                return Err(CanonError::BlankName);
            }
            let key = name.to_uppercase();
            if !seen.insert(key.clone()) {
                return Err(CanonError::DuplicateBook(name.clone()));
            }
            keys.push(key);
        }

        Ok(Canon { books, keys })
    }

    /// The King James Version canon.
    pub fn kjv() -> Self {
        let books: Vec<String> = KJV_BOOKS.iter().map(|b| b.to_string()).collect();
        let keys = books.iter().map(|b| b.to_uppercase()).collect();
        Canon { books, keys }
    }

    /// The book extraction starts in.
    pub fn first(&self) -> &str {
        &self.books[0]
    }

    pub fn books(&self) -> &[String] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Find the canonical spelling of `candidate`, ignoring case.
    pub fn lookup(&self, candidate: &str) -> Option<&str> {
        let key = candidate.to_uppercase();
        self.keys
            .iter()
            .position(|k| *k == key)
            .map(|i| self.books[i].as_str())
    }

    pub fn contains(&self, candidate: &str) -> bool {
        self.lookup(candidate).is_some()
    }
}

impl Default for Canon {
    fn default() -> Self {
        Self::kjv()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kjv_canon_order() {
        let canon = Canon::kjv();
        assert_eq!(canon.len(), 66);
        assert_eq!(canon.first(), "Genesis");
        assert_eq!(canon.books()[65], "Revelation");
    }

    #[test]
    fn test_lookup_ignores_case() {
        let canon = Canon::kjv();
        assert_eq!(canon.lookup("EXODUS"), Some("Exodus"));
        assert_eq!(canon.lookup("song of solomon"), Some("Song of Solomon"));
        assert_eq!(canon.lookup("1 kings"), Some("1 Kings"));
        assert_eq!(canon.lookup("Maccabees"), None);
    }

    #[test]
    fn test_rejects_empty_canon() {
        let books: Vec<&str> = Vec::new();
        assert_eq!(Canon::new(books), Err(CanonError::Empty));
    }

    #[test]
    fn test_rejects_case_insensitive_duplicates() {
        let err = Canon::new(["Genesis", "Exodus", "GENESIS"]).unwrap_err();
        assert_eq!(err, CanonError::DuplicateBook("GENESIS".to_string()));
    }

    #[test]
    fn test_rejects_blank_names() {
        assert_eq!(
            Canon::new(["Genesis", "   "]),
            Err(CanonError::BlankName)
        );
    }

    #[test]
    fn test_custom_canon_trims_names() {
        let canon = Canon::new([" Alpha ", "Beta"]).unwrap();
        assert_eq!(canon.first(), "Alpha");
        assert!(canon.contains("beta"));
    }
}
