//! Issues.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Open/closed state shared by issues and milestones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    Open,
    Closed,
}

impl IssueState {
    /// Returns the value used in `state=` query parameters.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for IssueState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user reference.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct User {
    pub login: String,
}

/// A label as embedded in an issue.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LabelRef {
    pub name: String,
}

/// A milestone as embedded in an issue.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MilestoneRef {
    pub title: String,
}

/// An issue as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Issue {
    /// Repository-assigned number, unique within one repository only.
    pub number: u64,

    /// API URL of the issue; comments live under `{url}/comments`.
    pub url: String,

    pub title: String,

    #[serde(default)]
    pub body: Option<String>,

    pub state: IssueState,

    #[serde(default)]
    pub assignee: Option<User>,

    #[serde(default)]
    pub labels: Vec<LabelRef>,

    #[serde(default)]
    pub milestone: Option<MilestoneRef>,

    /// Number of comments on the issue.
    #[serde(default)]
    pub comments: u64,
}

impl Issue {
    /// Returns the API URL listing this issue's comments.
    #[must_use]
    pub fn comments_url(&self) -> String {
        format!("{}/comments", self.url.trim_end_matches('/'))
    }

    /// Returns true if the issue has at least one comment.
    #[must_use]
    pub fn has_comments(&self) -> bool {
        self.comments > 0
    }

    /// Returns the assignee login, if any.
    #[must_use]
    pub fn assignee_login(&self) -> Option<&str> {
        self.assignee.as_ref().map(|user| user.login.as_str())
    }

    /// Returns the milestone title, if any.
    #[must_use]
    pub fn milestone_title(&self) -> Option<&str> {
        self.milestone.as_ref().map(|m| m.title.as_str())
    }

    /// Returns the label names in API order.
    #[must_use]
    pub fn label_names(&self) -> Vec<String> {
        self.labels.iter().map(|label| label.name.clone()).collect()
    }
}

/// Payload for `POST /issues`.
///
/// Absent fields are sent as JSON `null` so the server applies its defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewIssue {
    pub title: String,
    pub body: Option<String>,
    pub assignee: Option<String>,
    pub milestone: Option<u64>,
    pub labels: Vec<String>,
}

/// Payload for `PATCH {issue}` that only changes the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StateChange {
    pub state: IssueState,
}
