//! # kjv-parser
//!
//! Turns a plain-text dump of the King James Bible into a structured
//! book → chapter → verse mapping, and browses the result.
//!
//! File Layout
//!
//! src/kjv
//!   ├── canon        The ordered list of recognised book names
//!   ├── bible        The extracted structure and its numeric labels
//!   ├── extraction   Line classification and the parse-state fold
//!   ├── loader       Reading source text and locating the start marker
//!   ├── store        Persisted formats (json, yaml)
//!   ├── browsing     Read-only listing and substring search
//!   └── pipeline     Loader → extractor → store
//!
//! For test helpers, see the [testing module](kjv::testing).

pub mod kjv;
