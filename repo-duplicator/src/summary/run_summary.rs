//! Run summary types.

use super::result::{ImportStatus, RecordKind};
use crate::config::Pass;

/// Created/skipped/failed counters for one record kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub created: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl Tally {
    fn record(&mut self, status: &ImportStatus) {
        match status {
            ImportStatus::Created => self.created += 1,
            ImportStatus::Skipped { .. } => self.skipped += 1,
            ImportStatus::Failed { .. } => self.failed += 1,
        }
    }
}

/// Summary of a complete run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Pass that produced this summary.
    pub pass: Pass,

    /// Milestone outcomes.
    pub milestones: Tally,

    /// Label outcomes.
    pub labels: Tally,

    /// Issue outcomes.
    pub issues: Tally,

    /// Number of issue pairs examined by the update pass.
    pub issues_compared: usize,

    /// Number of comments copied onto destination issues.
    pub comments_created: usize,

    /// Number of destination issues whose state was changed.
    pub states_updated: usize,

    /// Number of issues whose comments could not be fetched.
    pub comment_fetch_failures: usize,
}

impl RunSummary {
    /// Creates a new empty summary.
    #[must_use]
    pub fn new(pass: Pass) -> Self {
        Self {
            pass,
            ..Default::default()
        }
    }

    /// Updates the summary with the outcome for one record.
    pub fn record(&mut self, kind: RecordKind, status: &ImportStatus) {
        match kind {
            RecordKind::Milestone => self.milestones.record(status),
            RecordKind::Label => self.labels.record(status),
            RecordKind::Issue => self.issues.record(status),
        }
    }

    /// Returns true if any tolerated failures occurred.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.milestones.failed > 0
            || self.labels.failed > 0
            || self.issues.failed > 0
            || self.comment_fetch_failures > 0
    }
}
