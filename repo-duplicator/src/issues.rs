//! Issue listing and creation.
//!
//! Issues are always fetched closed first, then open, and merged into a
//! single list sorted by number, so that both repositories and both passes
//! see the same ordering.

use crate::config::{Config, MatchStrategy};
use crate::models::{Issue, IssueState, Milestone};
use crate::pagination::{fetch_all, with_page_size};
use crate::reconcile::{issue_payload, merge_issues, plan_issue_imports, source_marker, IssueAction};
use crate::summary::{ImportStatus, RecordKind, RunSummary};
use crate::transport::{self, Transport, TransportError};
use tracing::{debug, info, info_span, Instrument};

/// Fetches the issues of a repository in one state, oldest first.
///
/// # Errors
///
/// Returns [`TransportError`] if a page request fails.
pub async fn fetch_issues_by_state(
    transport: &dyn Transport,
    repo_url: &str,
    state: IssueState,
) -> Result<Vec<Issue>, TransportError> {
    let url = with_page_size(&format!(
        "{repo_url}/issues?state={state}&sort=created&direction=asc"
    ));
    fetch_all(transport, &url).await
}

/// Fetches all issues of a repository sorted by number.
///
/// # Errors
///
/// Returns [`TransportError`] if a page request fails.
pub async fn fetch_issues(
    transport: &dyn Transport,
    repo_url: &str,
) -> Result<Vec<Issue>, TransportError> {
    let closed = fetch_issues_by_state(transport, repo_url, IssueState::Closed).await?;
    let open = fetch_issues_by_state(transport, repo_url, IssueState::Open).await?;
    debug!(
        closed = closed.len(),
        open = open.len(),
        repo_url,
        "Fetched issues"
    );
    Ok(merge_issues(closed, open))
}

/// Creates source issues that don't appear to exist in the destination.
///
/// `existing` must be the destination issues as returned by [`fetch_issues`];
/// `milestones` the destination milestones used to resolve milestone titles.
///
/// # Errors
///
/// Returns [`TransportError`] on the first failed creation.
pub async fn import_issues(
    transport: &dyn Transport,
    config: &Config,
    source: &[Issue],
    existing: &[Issue],
    milestones: &[Milestone],
    summary: &mut RunSummary,
) -> Result<(), TransportError> {
    let span = info_span!(
        "import_issues",
        destination = %config.destination(),
        strategy = %config.match_strategy()
    );

    async {
        let actions = plan_issue_imports(source, existing, config.match_strategy(), config.source());
        info!(
            source = source.len(),
            existing = existing.len(),
            "Importing issues"
        );

        let url = format!("{}/issues", config.destination_url());
        for action in actions {
            let issue = match action {
                IssueAction::Create(issue) => issue,
                IssueAction::Skip { issue, reason } => {
                    info!(issue_number = issue.number, reason = %reason, "Skipping issue");
                    summary.record(RecordKind::Issue, &ImportStatus::Skipped { reason });
                    continue;
                }
            };

            let marker = match config.match_strategy() {
                MatchStrategy::Marker => Some(source_marker(config.source(), issue.number)),
                MatchStrategy::Position => None,
            };
            let payload = issue_payload(issue, milestones, marker.as_deref());

            let created: Issue = transport::post(transport, &url, &payload).await?;
            info!(
                source_number = issue.number,
                issue_number = created.number,
                title = %created.title,
                "Created issue"
            );
            summary.record(RecordKind::Issue, &ImportStatus::Created);
        }

        Ok(())
    }
    .instrument(span)
    .await
}
