use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use super::classify::{classify, Paragraph};

/// Entry number → entry text. Keys are exposed as decimal strings and iterate
/// in ascending numeric order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Entries(BTreeMap<u128, String>);

impl Entries {
    /// Insert under `number`, returning the text it replaced.
    pub fn insert(&mut self, number: u128, text: String) -> Option<String> {
        self.0.insert(number, text)
    }

    /// Look up by decimal key. Non-canonical spellings such as `"01"` never match.
    pub fn get(&self, key: &str) -> Option<&str> {
        let number: u128 = key.parse().ok()?;
        if number.to_string() != key {
            return None;
        }
        self.get_number(number)
    }

    pub fn get_number(&self, number: u128) -> Option<&str> {
        self.0.get(&number).map(String::as_str)
    }

    pub fn keys(&self) -> impl Iterator<Item = String> + '_ {
        self.0.keys().map(u128::to_string)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u128, &str)> {
        self.0.iter().map(|(n, t)| (*n, t.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string_map(self) -> BTreeMap<String, String> {
        self.0.into_iter().map(|(n, t)| (n.to_string(), t)).collect()
    }
}

/// Mutable state threaded through one segmentation pass.
#[derive(Debug, Clone, Default)]
pub struct SegmentationState {
    pub first_number: Option<u128>,
    pub expected_number: Option<u128>,
    pub accumulator: Vec<String>,
}

impl SegmentationState {
    fn in_progress(&self) -> bool {
        !self.accumulator.is_empty()
    }

    /// Write the accumulator under `expected_number - 1`, the entry being closed.
    fn flush(&mut self, entries: &mut Entries) -> Option<u128> {
        if self.accumulator.is_empty() {
            return None;
        }
        let key = self.expected_number?.checked_sub(1)?;
        let text = std::mem::take(&mut self.accumulator).join("\n");
        entries.insert(key, text);
        Some(key)
    }
}

/// What a paragraph does to the entry under construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step<'a> {
    StartsEntry { number: u128, rest: &'a str },
    Continuation { text: &'a str },
    Blank,
    Noise,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SegmentStats {
    pub paragraphs: usize,
    pub blank: usize,
    pub numbered: usize,
    pub entries: usize,
    /// Numbered paragraphs folded into a body because they broke the sequence.
    pub folded_numbers: usize,
    /// Non-blank paragraphs discarded before the first entry.
    pub dropped: usize,
    pub first_number: Option<u128>,
    pub last_number: Option<u128>,
}

/// Single-pass segmenter. Feed paragraphs in document order with [`push`],
/// then call [`finish`].
///
/// [`push`]: Segmenter::push
/// [`finish`]: Segmenter::finish
#[derive(Debug, Default)]
pub struct Segmenter {
    state: SegmentationState,
    entries: Entries,
    stats: SegmentStats,
}

impl Segmenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SegmentationState {
        &self.state
    }

    /// Turn a classified paragraph into a step, recording the first number seen.
    fn step<'a>(&mut self, paragraph: Paragraph<'a>) -> Step<'a> {
        match paragraph {
            Paragraph::Blank if self.state.in_progress() => Step::Blank,
            Paragraph::Blank => Step::Noise,
            Paragraph::Numbered { number, rest, text } => {
                if self.state.first_number.is_none() {
                    self.state.first_number = Some(number);
                    self.state.expected_number = Some(number);
                }
                if self.state.expected_number == Some(number) {
                    Step::StartsEntry { number, rest }
                } else if self.state.in_progress() {
                    self.stats.folded_numbers += 1;
                    Step::Continuation { text }
                } else {
                    Step::Noise
                }
            }
            Paragraph::Text(text) if self.state.in_progress() => Step::Continuation { text },
            Paragraph::Text(_) => Step::Noise,
        }
    }

    pub fn push(&mut self, raw: &str) {
        let position = self.stats.paragraphs;
        self.stats.paragraphs += 1;

        let paragraph = classify(raw);
        match paragraph {
            Paragraph::Blank => self.stats.blank += 1,
            Paragraph::Numbered { .. } => self.stats.numbered += 1,
            Paragraph::Text(_) => {}
        }

        match self.step(paragraph) {
            Step::StartsEntry { number, rest } => {
                self.state.flush(&mut self.entries);
                self.state.expected_number = Some(number + 1);
                self.state.accumulator = vec![rest.to_string()];
                self.stats.entries += 1;
                self.stats.first_number.get_or_insert(number);
                self.stats.last_number = Some(number);
                debug!("Found entry {} at paragraph {}", number, position);
            }
            Step::Continuation { text } => self.state.accumulator.push(text.to_string()),
            Step::Blank => self.state.accumulator.push(String::new()),
            Step::Noise => {
                if !raw.trim().is_empty() {
                    self.stats.dropped += 1;
                }
            }
        }
    }

    pub fn finish(mut self) -> (Entries, SegmentStats) {
        self.state.flush(&mut self.entries);
        (self.entries, self.stats)
    }
}

/// Split an ordered sequence of paragraphs into numbered entries.
pub fn segment<I, S>(paragraphs: I) -> Entries
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    segment_with_stats(paragraphs).0
}

pub fn segment_with_stats<I, S>(paragraphs: I) -> (Entries, SegmentStats)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut segmenter = Segmenter::new();
    for p in paragraphs {
        segmenter.push(p.as_ref());
    }
    segmenter.finish()
}
