//! Test helpers
//!
//! Small fixtures shared by unit tests, integration tests and downstream
//! crates. Extraction always runs with the KJV canon and default rules here.

use crate::kjv::bible::Bible;
use crate::kjv::canon::Canon;
use crate::kjv::extraction::extract;

/// Extract `lines` with the KJV canon.
pub fn extract_lines(lines: &[&str]) -> Bible {
    extract(&Canon::kjv(), lines.iter().copied())
}

/// A short dump shaped like a real export: front matter, wrapped verses, bare
/// and labelled chapter headers, and a book title.
pub const SAMPLE_DUMP: &str = "\
THE HOLY BIBLE
Conteyning the Old Testament, and the New

In the beginning God created the heaven and the earth.
2 And the earth was without form, and void; and darkness was
upon the face of the deep.
3 And God said, Let there be light: and there was light.

2
1 Thus the heavens and the earth were finished, and all the
host of them.
THE BOOK OF EXODUS
1 Now these are the names of the children of Israel, which
came into Egypt.
Chapter 2
1 And there went a man of the house of Levi, and took to wife
a daughter of Levi.
";

/// Assert every committed verse is cleaned.
pub fn assert_verses_clean(bible: &Bible) {
    for (book, chapter, verse, text) in bible.iter_verses() {
        assert_eq!(
            text,
            text.trim_end_matches('\r').trim(),
            "{} {}:{} is not trimmed",
            book,
            chapter,
            verse
        );
    }
}
