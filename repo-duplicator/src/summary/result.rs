//! Per-record outcomes.

/// Kind of record being duplicated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Milestone,
    Label,
    Issue,
}

/// Outcome of duplicating a single record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportStatus {
    /// Record created in the destination.
    Created,

    /// Record left alone because it already seems to exist.
    Skipped {
        /// Reason for skipping.
        reason: String,
    },

    /// Creation failed and the run continued.
    Failed {
        /// Error message.
        error: String,
    },
}
