//! Reducers fed by the tokenizers: a plain token counter and the duplicate-line
//! finder.

use crate::mode::Mode;
use crate::token::Token;
use alloc::string::String;
use alloc::vec::Vec;
use hashbrown::HashMap;

/// Index of a source registered with [`DuplicateFinder::begin_source`].
pub type SourceId = usize;

/// Running token count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenCounter {
    count: u64,
}

impl TokenCounter {
    #[must_use]
    pub const fn new() -> Self {
        Self { count: 0 }
    }

    /// Only presence matters, content is ignored.
    pub fn observe(&mut self, _token: &Token) {
        self.count += 1;
    }

    /// Adds tokens counted outside the token stream (chunked fast path).
    pub fn add(&mut self, tokens: u64) {
        self.count += tokens;
    }

    #[must_use]
    pub const fn count(&self) -> u64 {
        self.count
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct LineRecord {
    count: u64,
    last_seen: Option<SourceId>,
}

/// Line frequency table with last-seen source attribution.
///
/// Once a line has been seen twice, every further occurrence overwrites its
/// attribution with the current source. The source reported for a duplicate is
/// therefore the last one containing it, which is not necessarily where the
/// first repeat happened. This is a known limitation and is kept as is.
#[derive(Debug, Default)]
pub struct DuplicateFinder {
    sources: Vec<String>,
    current: Option<SourceId>,
    lines: HashMap<Vec<u8>, LineRecord>,
}

impl DuplicateFinder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the source whose lines follow.
    pub fn begin_source(&mut self, name: impl Into<String>) -> SourceId {
        let id = self.sources.len();
        self.sources.push(name.into());
        self.current = Some(id);
        id
    }

    pub fn observe(&mut self, line: Token) {
        let record = self.lines.entry(line.into_bytes()).or_default();
        record.count += 1;
        if record.count >= 2 {
            record.last_seen = self.current;
        }
    }

    /// Number of distinct lines seen so far, duplicated or not.
    #[must_use]
    pub fn distinct_lines(&self) -> usize {
        self.lines.len()
    }

    /// Keeps only lines seen at least twice.
    #[must_use]
    pub fn finish(self) -> DuplicateTable {
        let Self { sources, lines, .. } = self;
        let entries = lines
            .into_iter()
            .filter(|(_, record)| record.count >= 2)
            .map(|(line, record)| DuplicateEntry {
                source: record
                    .last_seen
                    .and_then(|id| sources.get(id).cloned())
                    .unwrap_or_default(),
                count: record.count,
                line,
            })
            .collect();
        DuplicateTable { entries }
    }
}

/// A line seen more than once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateEntry {
    pub line: Vec<u8>,
    pub count: u64,
    /// Last source, in processing order, containing the line.
    pub source: String,
}

/// Duplicated lines in unspecified order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DuplicateTable {
    entries: Vec<DuplicateEntry>,
}

impl DuplicateTable {
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> core::slice::Iter<'_, DuplicateEntry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn get(&self, line: &[u8]) -> Option<&DuplicateEntry> {
        self.entries.iter().find(|e| e.line == line)
    }
}

impl<'a> IntoIterator for &'a DuplicateTable {
    type Item = &'a DuplicateEntry;
    type IntoIter = core::slice::Iter<'a, DuplicateEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Terminal result of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Count(u64),
    Duplicates(DuplicateTable),
}

/// Reducer for one run, chosen by [`Mode`].
#[derive(Debug)]
pub enum Aggregator {
    Count(TokenCounter),
    Duplicates(DuplicateFinder),
}

impl Aggregator {
    #[must_use]
    pub fn new(mode: Mode) -> Self {
        if mode.is_counting() {
            Self::Count(TokenCounter::new())
        } else {
            Self::Duplicates(DuplicateFinder::new())
        }
    }

    #[must_use]
    pub const fn is_counting(&self) -> bool {
        matches!(self, Self::Count(_))
    }

    pub fn begin_source(&mut self, name: &str) {
        if let Self::Duplicates(finder) = self {
            finder.begin_source(name);
        }
    }

    pub fn observe(&mut self, token: Token) {
        match self {
            Self::Count(counter) => counter.observe(&token),
            Self::Duplicates(finder) => finder.observe(token),
        }
    }

    /// Adds a pre-counted batch. Ignored when finding duplicates, which needs
    /// the tokens themselves.
    pub fn add_count(&mut self, tokens: u64) {
        if let Self::Count(counter) = self {
            counter.add(tokens);
        }
    }

    #[must_use]
    pub fn finish(self) -> Outcome {
        match self {
            Self::Count(counter) => Outcome::Count(counter.count()),
            Self::Duplicates(finder) => Outcome::Duplicates(finder.finish()),
        }
    }
}
