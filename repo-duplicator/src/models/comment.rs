//! Issue comments.

use serde::{Deserialize, Serialize};

/// A comment as returned by the API, in creation order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Comment {
    /// Comment text; compared verbatim between repositories.
    #[serde(default)]
    pub body: String,
}

/// Payload for `POST {issue}/comments`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewComment {
    pub body: String,
}
