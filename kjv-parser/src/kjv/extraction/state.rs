//! Parse state and transitions
//!
//! The state is a value: [`ParseState::apply`] consumes it together with a
//! classified line and returns the next state. At most one verse is open at a
//! time; any book, chapter or verse transition commits it first.

use super::classification::LineKind;
use crate::kjv::bible::{Bible, Label};

/// The verse currently being assembled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenVerse {
    pub number: Label,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseState {
    current_book: String,
    current_chapter: Label,
    open_verse: Option<OpenVerse>,
    // Only used to recognise an unnumbered first verse.
    verses_in_chapter: usize,
    bible: Bible,
}

impl ParseState {
    /// Start in chapter 1 of `first_book`.
    pub fn new(first_book: &str) -> Self {
        ParseState {
            current_book: first_book.to_string(),
            current_chapter: Label::from("1"),
            open_verse: None,
            verses_in_chapter: 0,
            bible: Bible::starting_with(first_book),
        }
    }

    pub fn current_book(&self) -> &str {
        &self.current_book
    }

    pub fn current_chapter(&self) -> &Label {
        &self.current_chapter
    }

    pub fn open_verse(&self) -> Option<&OpenVerse> {
        self.open_verse.as_ref()
    }

    pub fn verses_in_chapter(&self) -> usize {
        self.verses_in_chapter
    }

    pub fn has_open_verse(&self) -> bool {
        self.open_verse.is_some()
    }

    /// True until the first verse of the current chapter has been opened.
    pub fn awaiting_first_verse(&self) -> bool {
        self.verses_in_chapter == 0 && self.open_verse.is_none()
    }

    /// What has been committed so far.
    pub fn bible(&self) -> &Bible {
        &self.bible
    }

    /// Advance the state by one classified line.
    pub fn apply(mut self, kind: LineKind) -> Self {
        match kind {
            LineKind::Blank | LineKind::Discard => {}
            LineKind::BookTitle(book) => {
                self.commit();
                self.bible.open_book(&book);
                self.current_book = book;
                self.current_chapter = Label::from("1");
                self.verses_in_chapter = 0;
            }
            LineKind::ChapterMarker(chapter) => {
                self.commit();
                self.bible.open_chapter(&self.current_book, &chapter);
                self.current_chapter = chapter;
                self.verses_in_chapter = 0;
            }
            LineKind::FirstVerseImplicit(text) => {
                self.open_verse = Some(OpenVerse {
                    number: Label::from("1"),
                    text,
                });
                self.verses_in_chapter += 1;
            }
            LineKind::VerseStart { number, text } => {
                if self.commit() {
                    self.verses_in_chapter += 1;
                }
                self.open_verse = Some(OpenVerse { number, text });
            }
            LineKind::Continuation(line) => {
                if let Some(verse) = self.open_verse.as_mut() {
                    verse.text.push(' ');
                    verse.text.push_str(&line);
                }
            }
        }
        self
    }

    /// Commit the open verse and hand back the finished structure.
    pub fn finish(mut self) -> Bible {
        self.commit();
        self.bible
    }

    /// Write the open verse into the Bible. Returns false if nothing was open.
    fn commit(&mut self) -> bool {
        match self.open_verse.take() {
            Some(verse) => {
                self.bible.insert_verse(
                    &self.current_book,
                    &self.current_chapter,
                    verse.number,
                    &verse.text,
                );
                true
            }
            None => false,
        }
    }
}
