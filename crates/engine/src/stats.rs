use crate::error::EngineError;
use crate::source::SourceName;
use tally_core::Outcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceStatus {
    Completed,
    OpenFailed,
    /// Tokens read before the failure were kept.
    ReadFailed,
}

/// Per-source bookkeeping for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceStats {
    pub name: SourceName,
    pub tokens: u64,
    pub status: SourceStatus,
}

impl SourceStats {
    #[must_use]
    pub const fn succeeded(&self) -> bool {
        matches!(self.status, SourceStatus::Completed)
    }
}

/// Result of a run: whatever the successful sources produced, plus the
/// failures met along the way.
#[derive(Debug)]
pub struct RunResult {
    pub outcome: Outcome,
    pub sources: Vec<SourceStats>,
    pub errors: Vec<EngineError>,
}

impl RunResult {
    /// True when sources were attempted and none of them could be fully read.
    #[must_use]
    pub fn all_failed(&self) -> bool {
        !self.sources.is_empty() && !self.sources.iter().any(SourceStats::succeeded)
    }
}
