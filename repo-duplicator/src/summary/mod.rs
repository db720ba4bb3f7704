//! Run summary types and helpers.

mod result;
mod run_summary;

pub use result::{ImportStatus, RecordKind};
pub use run_summary::{RunSummary, Tally};
