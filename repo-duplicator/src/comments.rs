//! Issue comment listing and creation.

use crate::models::{Comment, Issue, NewComment};
use crate::pagination::{fetch_all, with_page_size};
use crate::transport::{self, Transport, TransportError};
use serde_json::Value;

/// Fetches the comments of an issue in creation order.
///
/// Issues whose comment count is zero return an empty list without a request.
///
/// # Errors
///
/// Returns [`TransportError`] if a page request fails.
pub async fn fetch_comments(
    transport: &dyn Transport,
    issue: &Issue,
) -> Result<Vec<Comment>, TransportError> {
    if !issue.has_comments() {
        return Ok(Vec::new());
    }
    fetch_all(transport, &with_page_size(&issue.comments_url())).await
}

/// Adds a comment to an issue.
///
/// # Errors
///
/// Returns [`TransportError`] if the request fails.
pub async fn create_comment(
    transport: &dyn Transport,
    issue: &Issue,
    body: &str,
) -> Result<(), TransportError> {
    let payload = NewComment {
        body: body.to_string(),
    };
    let _: Value = transport::post(transport, &issue.comments_url(), &payload).await?;
    Ok(())
}
