//! Splits scraped pages of numbered jokes into one entry per sequence number.
//!
//! The input is the ordered list of paragraphs an HTML extractor pulled out of
//! a page. A new entry starts only when a paragraph's leading number continues
//! the running sequence; any other text, stray numbers included, belongs to
//! the entry in progress.
//!
//! ```
//! use joke_splitter::segment;
//!
//! let entries = segment(["Preface", "1 Alpha", "99 footnote", "2 Beta"]);
//! assert_eq!(entries.get("1"), Some("Alpha\n99 footnote"));
//! assert_eq!(entries.get("2"), Some("Beta"));
//! ```

pub mod corpus;
pub mod parser;
pub mod settings;
pub mod source;

pub use parser::{process_page, segment, segment_with_stats, Entries, Page, PageEntries, SegmentStats};
