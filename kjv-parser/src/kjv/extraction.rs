//! Structural Extraction
//!
//!     Converts a stream of raw text lines into a [`Bible`]. Extraction is a
//!     single forward pass with no lookahead:
//!
//!         1. Classification. See [classification](classification).
//!            Each line is classified against the canon and the current state,
//!            producing a [`LineKind`]. Classification is pure.
//!
//!         2. Transition. See [state](state).
//!            The [`ParseState`] value consumes the line kind and returns the
//!            next state, committing the open verse whenever the book, chapter
//!            or verse changes.
//!
//!     After the last line the open verse (if any) is committed and the Bible
//!     is returned. Extraction never fails: lines that fit no rule are either
//!     appended to the open verse or dropped.
//!
//! Heuristics
//!
//!     The source is a text export with running headers, page numbers and
//!     chapter numbers all on lines of their own. Book titles are recognised
//!     only when they name a canonical book other than the current one, so a
//!     book's own running header cannot restart it. Bare numbers count as
//!     chapters only in 2..=150; verse text must be longer than ten characters.
//!     Short genuine verses are misfiled by these rules; that is accepted.

pub mod classification;
pub mod state;

pub use classification::{Classifier, ClassifierRules, LineKind};
pub use state::{OpenVerse, ParseState};

use crate::kjv::bible::Bible;
use crate::kjv::canon::Canon;
use tracing::{debug, info};

/// Runs the classifier/state fold over a line sequence.
#[derive(Debug, Clone)]
pub struct Extractor<'a> {
    classifier: Classifier<'a>,
    progress_interval: usize,
}

impl<'a> Extractor<'a> {
    pub fn new(canon: &'a Canon) -> Self {
        Self::with_rules(canon, ClassifierRules::default())
    }

    pub fn with_rules(canon: &'a Canon, rules: ClassifierRules) -> Self {
        Extractor {
            classifier: Classifier::with_rules(canon, rules),
            progress_interval: 1000,
        }
    }

    /// Log progress every `interval` lines; 0 turns it off.
    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval;
        self
    }

    pub fn classifier(&self) -> &Classifier<'a> {
        &self.classifier
    }

    /// Extract the structure of `lines`.
    pub fn extract<I, S>(&self, lines: I) -> Bible
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let start = ParseState::new(self.classifier.canon().first());

        let state = lines
            .into_iter()
            .enumerate()
            .fold(start, |state, (index, line)| {
                let line = line.as_ref();
                if self.progress_interval > 0 && index % self.progress_interval == 0 {
                    debug!(
                        line = index,
                        book = state.current_book(),
                        chapter = %state.current_chapter(),
                        "extracting"
                    );
                }

                let kind = self.classifier.classify(line, &state);
                match &kind {
                    LineKind::BookTitle(book) => {
                        debug!(line = index, from = state.current_book(), to = %book, "book transition");
                    }
                    LineKind::ChapterMarker(chapter) => {
                        debug!(line = index, book = state.current_book(), chapter = %chapter, "chapter start");
                    }
                    _ => {}
                }
                state.apply(kind)
            });

        let bible = state.finish();
        info!(
            books = bible.books().len(),
            chapters = bible.chapter_count(),
            verses = bible.verse_count(),
            "extraction complete"
        );
        bible
    }
}

/// Extract with the default rules.
pub fn extract<I, S>(canon: &Canon, lines: I) -> Bible
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Extractor::new(canon).extract(lines)
}
