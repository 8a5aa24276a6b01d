pub mod classify;
pub mod segment;

use serde::Serialize;
use tracing::info;

pub use segment::{segment, segment_with_stats, Entries, SegmentStats};

/// Paragraphs extracted from one source page, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub id: String,
    pub paragraphs: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PageEntries {
    pub page_id: String,
    pub entries: Entries,
    pub stats: SegmentStats,
}

/// Two-step pipeline: paragraphs → classified steps → numbered entries.
pub fn process_page(page: &Page) -> PageEntries {
    let (entries, stats) = segment_with_stats(&page.paragraphs);
    info!(
        page = %page.id,
        paragraphs = stats.paragraphs,
        entries = stats.entries,
        folded = stats.folded_numbers,
        dropped = stats.dropped,
        "Segmented page"
    );
    PageEntries {
        page_id: page.id.clone(),
        entries,
        stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(id: &str, paragraphs: &[&str]) -> Page {
        Page {
            id: id.to_string(),
            paragraphs: paragraphs.iter().map(|p| p.to_string()).collect(),
        }
    }

    #[test]
    fn processes_page() {
        let p = page("28896", &["Title", "1 First", "", "more", "2 Second"]);
        let out = process_page(&p);
        assert_eq!(out.page_id, "28896");
        assert_eq!(out.entries.get("1"), Some("First\n\nmore"));
        assert_eq!(out.entries.get("2"), Some("Second"));
        assert_eq!(out.stats.entries, 2);
        assert_eq!(out.stats.dropped, 1);
    }

    #[test]
    fn page_without_numbers() {
        let out = process_page(&page("empty", &["a", "b"]));
        assert!(out.entries.is_empty());
        assert_eq!(out.stats.first_number, None);
    }
}
