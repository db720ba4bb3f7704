//! Second pass: copy comments and state onto duplicated issues.

use crate::comments::{create_comment, fetch_comments};
use crate::config::Config;
use crate::models::{Comment, Issue, StateChange};
use crate::reconcile::pair_issues;
use crate::summary::RunSummary;
use crate::transport::{self, Transport, TransportError};
use serde_json::Value;
use std::collections::HashSet;
use tracing::{debug, info, info_span, warn, Instrument};

/// Brings every matched destination issue in line with its source issue.
///
/// # Errors
///
/// Returns [`TransportError`] if creating a comment or changing a state fails.
/// Failures to list comments are logged and treated as "no comments".
pub async fn update_issues(
    transport: &dyn Transport,
    config: &Config,
    source: &[Issue],
    destination: &[Issue],
    summary: &mut RunSummary,
) -> Result<(), TransportError> {
    let pairs = pair_issues(source, destination, config.match_strategy(), config.source());
    info!(
        source = source.len(),
        destination = destination.len(),
        pairs = pairs.len(),
        "Updating issues"
    );

    for (source_issue, destination_issue) in pairs {
        update_issue(transport, source_issue, destination_issue, summary).await?;
    }

    Ok(())
}

/// Copies missing comments and the state of one source issue onto its counterpart.
///
/// A source comment is considered present when a destination comment has the
/// exact same body. Distinct source comments sharing one body are therefore
/// only copied once.
///
/// # Errors
///
/// Returns [`TransportError`] if creating a comment or changing the state fails.
pub async fn update_issue(
    transport: &dyn Transport,
    source: &Issue,
    destination: &Issue,
    summary: &mut RunSummary,
) -> Result<(), TransportError> {
    let span = info_span!(
        "update_issue",
        source_number = source.number,
        issue_number = destination.number
    );

    async {
        summary.issues_compared += 1;

        let comments = comments_or_empty(transport, source, summary).await;
        let existing = comments_or_empty(transport, destination, summary).await;
        let mut present: HashSet<String> = existing.into_iter().map(|c| c.body).collect();

        for comment in comments {
            if present.contains(&comment.body) {
                continue;
            }
            create_comment(transport, destination, &comment.body).await?;
            debug!("Copied comment");
            summary.comments_created += 1;
            present.insert(comment.body);
        }

        if source.state != destination.state {
            let change = StateChange {
                state: source.state,
            };
            let _: Value = transport::patch(transport, &destination.url, &change).await?;
            info!(from = %destination.state, to = %source.state, "Updated issue state");
            summary.states_updated += 1;
        }

        Ok(())
    }
    .instrument(span)
    .await
}

async fn comments_or_empty(
    transport: &dyn Transport,
    issue: &Issue,
    summary: &mut RunSummary,
) -> Vec<Comment> {
    match fetch_comments(transport, issue).await {
        Ok(comments) => comments,
        Err(e) => {
            warn!(
                issue_number = issue.number,
                url = %issue.url,
                error = %e,
                "Failed to fetch comments, treating as none"
            );
            summary.comment_fetch_failures += 1;
            Vec::new()
        }
    }
}
