//! Milestones.

use super::IssueState;
use serde::{Deserialize, Serialize};

/// A milestone as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Milestone {
    /// Repository-assigned milestone number.
    pub number: u64,

    /// Milestone title; the natural key across repositories.
    pub title: String,

    /// `open` or `closed`.
    pub state: IssueState,

    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,

    /// Due date as an ISO-8601 timestamp.
    #[serde(default)]
    pub due_on: Option<String>,
}

/// Payload for `POST /milestones`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewMilestone {
    pub title: String,
    pub state: IssueState,
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_on: Option<String>,
}

impl From<&Milestone> for NewMilestone {
    fn from(source: &Milestone) -> Self {
        Self {
            title: source.title.clone(),
            state: source.state,
            description: source.description.clone(),
            due_on: source.due_on.clone(),
        }
    }
}
