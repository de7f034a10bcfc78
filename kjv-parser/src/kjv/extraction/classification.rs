//! Line Classification
//!
//! Decides what a single source line means given the current parse state. The
//! classifier never mutates anything; the resulting [`LineKind`] is handed to
//! [`ParseState::apply`](super::state::ParseState::apply).
//!
//! Rules are checked in a fixed priority order and the first match wins:
//! blank, book title (three shapes), chapter marker, unnumbered first verse,
//! numbered verse, continuation, discard.

use super::state::ParseState;
use crate::kjv::bible::Label;
use crate::kjv::canon::Canon;
use once_cell::sync::Lazy;
use regex::Regex;

/// "4 Genesis": a running header with a page or chapter number in front
static NUMBER_THEN_BOOK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+\s+([A-Z][a-zA-Z\s]+)$").unwrap());
/// "Genesis 5"
static BOOK_THEN_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Z][a-zA-Z\s]+)\s+[0-9]+$").unwrap());
static BOOK_OF: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^THE BOOK OF (.+)$").unwrap());
static CHAPTER_LABEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^Chapter ([0-9]+)$").unwrap());
static BARE_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").unwrap());
static VERSE_START: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]+)\s+([A-Za-z].+)$").unwrap());

/// What a line does to the parse state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    Blank,
    /// Switch to this canonical book
    BookTitle(String),
    /// Switch to this chapter of the current book
    ChapterMarker(Label),
    /// Opening text of verse 1 when the source omits the number
    FirstVerseImplicit(String),
    VerseStart { number: Label, text: String },
    /// More text for the open verse
    Continuation(String),
    /// Noise outside any verse
    Discard,
}

/// Thresholds used to tell structure apart from noise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifierRules {
    /// Largest bare number read as a chapter header. Bare numbers must also exceed 1.
    pub max_chapter: u64,
    /// Verse text must be strictly longer than this many characters.
    pub min_verse_text_chars: usize,
}

impl Default for ClassifierRules {
    fn default() -> Self {
        ClassifierRules {
            max_chapter: 150,
            min_verse_text_chars: 10,
        }
    }
}

/// Classifies lines against a canon.
#[derive(Debug, Clone)]
pub struct Classifier<'a> {
    canon: &'a Canon,
    rules: ClassifierRules,
}

impl<'a> Classifier<'a> {
    pub fn new(canon: &'a Canon) -> Self {
        Self::with_rules(canon, ClassifierRules::default())
    }

    pub fn with_rules(canon: &'a Canon, rules: ClassifierRules) -> Self {
        Classifier { canon, rules }
    }

    pub fn canon(&self) -> &'a Canon {
        self.canon
    }

    pub fn rules(&self) -> ClassifierRules {
        self.rules
    }

    /// Determine the kind of `line` in the context of `state`.
    pub fn classify(&self, line: &str, state: &ParseState) -> LineKind {
        let line = line.trim();
        if line.is_empty() {
            return LineKind::Blank;
        }

        if let Some(book) = self.book_transition(line, state.current_book()) {
            return LineKind::BookTitle(book.to_string());
        }

        if let Some(chapter) = self.chapter_marker(line) {
            return LineKind::ChapterMarker(chapter);
        }

        if state.awaiting_first_verse()
            && !starts_with_digit(line)
            && char_len(line) > self.rules.min_verse_text_chars
        {
            return LineKind::FirstVerseImplicit(line.to_string());
        }

        if let Some((number, text)) = self.verse_start(line) {
            return LineKind::VerseStart {
                number: Label::from(number),
                text: text.to_string(),
            };
        }

        if state.has_open_verse() {
            LineKind::Continuation(line.to_string())
        } else {
            LineKind::Discard
        }
    }

    /// A canonical book named by `line`, other than `current`.
    pub fn book_transition(&self, line: &str, current: &str) -> Option<&'a str> {
        let other = |candidate: &str| self.canon.lookup(candidate).filter(|b| *b != current);

        other(line)
            .or_else(|| {
                NUMBER_THEN_BOOK
                    .captures(line)
                    .and_then(|caps| other(caps[1].trim()))
            })
            .or_else(|| {
                BOOK_THEN_NUMBER
                    .captures(line)
                    .and_then(|caps| other(caps[1].trim()))
            })
            .or_else(|| BOOK_OF.captures(line).and_then(|caps| other(caps[1].trim())))
    }

    /// The chapter a header line opens, if it is one.
    pub fn chapter_marker(&self, line: &str) -> Option<Label> {
        if let Some(caps) = CHAPTER_LABEL.captures(line) {
            return Some(Label::from(&caps[1]));
        }
        if BARE_NUMBER.is_match(line) {
            // Overflow means the value is far beyond any chapter.
            let value = line.parse::<u64>().ok()?;
            if value > 1 && value <= self.rules.max_chapter {
                return Some(Label::from(line));
            }
        }
        None
    }

    /// Split "<digits> <text>" when the text is long enough to be a verse.
    pub fn verse_start<'l>(&self, line: &'l str) -> Option<(&'l str, &'l str)> {
        let caps = VERSE_START.captures(line)?;
        let number = caps.get(1)?.as_str();
        let text = caps.get(2)?.as_str();
        (char_len(text) > self.rules.min_verse_text_chars).then_some((number, text))
    }
}

fn starts_with_digit(line: &str) -> bool {
    line.starts_with(|c: char| c.is_ascii_digit())
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn genesis_state() -> ParseState {
        ParseState::new("Genesis")
    }

    fn state_with_open_verse() -> ParseState {
        genesis_state().apply(LineKind::VerseStart {
            number: Label::from("1"),
            text: "In the beginning God created".to_string(),
        })
    }

    fn classify(line: &str, state: &ParseState) -> LineKind {
        let canon = Canon::kjv();
        Classifier::new(&canon).classify(line, state)
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\r")]
    fn test_blank_lines(#[case] line: &str) {
        assert_eq!(classify(line, &state_with_open_verse()), LineKind::Blank);
    }

    #[rstest]
    #[case("Exodus", "Exodus")]
    #[case("EXODUS", "Exodus")]
    #[case("  leviticus \r", "Leviticus")]
    #[case("Song of Solomon", "Song of Solomon")]
    #[case("1 Samuel", "1 Samuel")]
    fn test_standalone_book_title(#[case] line: &str, #[case] book: &str) {
        assert_eq!(
            classify(line, &genesis_state()),
            LineKind::BookTitle(book.to_string())
        );
    }

    #[rstest]
    #[case("4 Exodus", "Exodus")]
    #[case("12 Song of Solomon", "Song of Solomon")]
    #[case("Exodus 5", "Exodus")]
    #[case("Numbers 33", "Numbers")]
    fn test_running_header_book_title(#[case] line: &str, #[case] book: &str) {
        assert_eq!(
            classify(line, &genesis_state()),
            LineKind::BookTitle(book.to_string())
        );
    }

    #[rstest]
    #[case("THE BOOK OF EXODUS", "Exodus")]
    #[case("The Book of Ruth", "Ruth")]
    #[case("the book of  judges ", "Judges")]
    fn test_book_of_title(#[case] line: &str, #[case] book: &str) {
        assert_eq!(
            classify(line, &genesis_state()),
            LineKind::BookTitle(book.to_string())
        );
    }

    #[test]
    fn test_current_book_title_is_not_a_transition() {
        let state = state_with_open_verse();
        assert_eq!(
            classify("Genesis", &state),
            LineKind::Continuation("Genesis".to_string())
        );
        assert_eq!(
            classify("Genesis 4", &state),
            LineKind::Continuation("Genesis 4".to_string())
        );
        assert_eq!(classify("GENESIS", &genesis_state()), LineKind::Discard);
    }

    #[test]
    fn test_unknown_book_is_not_a_transition() {
        // Not canonical, so it is just a long line opening verse 1.
        assert_eq!(
            classify("THE BOOK OF ENOCH", &genesis_state()),
            LineKind::FirstVerseImplicit("THE BOOK OF ENOCH".to_string())
        );
        assert_eq!(classify("Tobit", &genesis_state()), LineKind::Discard);
    }

    #[test]
    fn test_explicit_chapter_label() {
        assert_eq!(
            classify("Chapter 3", &state_with_open_verse()),
            LineKind::ChapterMarker(Label::from("3"))
        );
        assert_eq!(
            classify("Chapter 1", &genesis_state()),
            LineKind::ChapterMarker(Label::from("1"))
        );
    }

    #[rstest]
    #[case("2", true)]
    #[case("50", true)]
    #[case("150", true)]
    #[case("1", false)]
    #[case("0", false)]
    #[case("151", false)]
    #[case("99999999999999999999999", false)]
    fn test_bare_number_chapter_range(#[case] line: &str, #[case] is_chapter: bool) {
        let kind = classify(line, &state_with_open_verse());
        if is_chapter {
            assert_eq!(kind, LineKind::ChapterMarker(Label::from(line)));
        } else {
            assert_eq!(kind, LineKind::Continuation(line.to_string()));
        }
    }

    #[test]
    fn test_first_verse_without_number() {
        let line = "In the beginning God created the heaven and the earth.";
        assert_eq!(
            classify(line, &genesis_state()),
            LineKind::FirstVerseImplicit(line.to_string())
        );
    }

    #[test]
    fn test_first_verse_requires_more_than_ten_chars() {
        assert_eq!(classify("Ten chars.", &genesis_state()), LineKind::Discard);
        assert_eq!(
            classify("Eleven char", &genesis_state()),
            LineKind::FirstVerseImplicit("Eleven char".to_string())
        );
    }

    #[test]
    fn test_first_verse_only_when_nothing_is_open() {
        let line = "and the darkness was upon the face";
        assert_eq!(
            classify(line, &state_with_open_verse()),
            LineKind::Continuation(line.to_string())
        );
    }

    #[rstest]
    #[case("2 abcdefghij", None)]
    #[case("2 abcdefghijk", Some("abcdefghijk"))]
    #[case("31 And God saw every thing", Some("And God saw every thing"))]
    fn test_numbered_verse_threshold(#[case] line: &str, #[case] text: Option<&str>) {
        let kind = classify(line, &state_with_open_verse());
        match text {
            Some(text) => assert_eq!(
                kind,
                LineKind::VerseStart {
                    number: Label::from(&line[..line.find(' ').unwrap()]),
                    text: text.to_string(),
                }
            ),
            None => assert_eq!(kind, LineKind::Continuation(line.to_string())),
        }
    }

    #[test]
    fn test_short_numbered_fragment_is_discarded_without_open_verse() {
        let canon = Canon::kjv();
        let classifier = Classifier::new(&canon);
        let state = genesis_state().apply(LineKind::ChapterMarker(Label::from("2")));
        assert_eq!(classifier.classify("3 short", &state), LineKind::Discard);
    }

    #[test]
    fn test_numbered_verse_needs_a_letter_after_the_number() {
        assert_eq!(
            classify("3 (and the evening and the morning)", &state_with_open_verse()),
            LineKind::Continuation("3 (and the evening and the morning)".to_string())
        );
    }

    #[test]
    fn test_custom_rules() {
        let canon = Canon::kjv();
        let rules = ClassifierRules {
            max_chapter: 200,
            min_verse_text_chars: 3,
        };
        let classifier = Classifier::with_rules(&canon, rules);
        let state = genesis_state();
        assert_eq!(
            classifier.classify("175", &state),
            LineKind::ChapterMarker(Label::from("175"))
        );
        assert_eq!(
            classifier.classify("4 Jesus wept", &state),
            LineKind::VerseStart {
                number: Label::from("4"),
                text: "Jesus wept".to_string(),
            }
        );
    }
}
