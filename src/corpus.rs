use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::parser::{Entries, PageEntries};

/// All entries across pages, keyed by entry number. A later page overwrites
/// an earlier page's entry with the same number.
#[derive(Debug, Default)]
pub struct Corpus {
    entries: Entries,
    pages: usize,
    collisions: usize,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn merge(&mut self, page: &PageEntries) {
        for (number, text) in page.entries.iter() {
            if self.entries.insert(number, text.to_string()).is_some() {
                self.collisions += 1;
                warn!("Entry {} from page {} overwrites an earlier entry", number, page.page_id);
            }
        }
        self.pages += 1;
        info!("Current total entries: {}", self.entries.len());
    }

    pub fn entries(&self) -> &Entries {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn pages(&self) -> usize {
        self.pages
    }

    pub fn collisions(&self) -> usize {
        self.collisions
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.entries).context("Failed to serialize entries")
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        info!("Saving {} entries to {}", self.len(), path.display());
        let json = self.to_json()?;
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }
        std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
    }
}
