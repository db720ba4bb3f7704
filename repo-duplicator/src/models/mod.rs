//! REST API records and creation payloads.
//!
//! Only the fields the duplicator reads or writes are modelled; everything
//! else in the API responses is ignored during deserialization.

mod comment;
mod issue;
mod label;
mod milestone;

pub use comment::{Comment, NewComment};
pub use issue::{Issue, IssueState, LabelRef, MilestoneRef, NewIssue, StateChange, User};
pub use label::{Label, NewLabel};
pub use milestone::{Milestone, NewMilestone};
