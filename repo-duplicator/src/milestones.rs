//! Milestone listing and creation.

use crate::config::{Config, ErrorPolicy};
use crate::models::{IssueState, Milestone, NewMilestone};
use crate::pagination::{fetch_all, with_page_size};
use crate::reconcile::milestones_to_create;
use crate::summary::{ImportStatus, RecordKind, RunSummary};
use crate::transport::{self, Transport, TransportError};
use tracing::{debug, info, info_span, warn, Instrument};

/// Fetches open and then closed milestones of a repository.
///
/// A 404 for one state is treated as "no milestones in that state".
///
/// # Errors
///
/// Returns [`TransportError`] for any other failed request.
pub async fn fetch_milestones(
    transport: &dyn Transport,
    repo_url: &str,
) -> Result<Vec<Milestone>, TransportError> {
    let mut milestones = Vec::new();

    for state in [IssueState::Open, IssueState::Closed] {
        let url = with_page_size(&format!("{repo_url}/milestones?state={state}"));
        match fetch_all::<Milestone>(transport, &url).await {
            Ok(page) => milestones.extend(page),
            Err(e) if e.is_not_found() => {
                debug!(url = %url, "No milestones found");
            }
            Err(e) => return Err(e),
        }
    }

    Ok(milestones)
}

/// Creates source milestones missing from the destination.
///
/// Milestones whose title already exists in `existing` are skipped and never
/// modified. Creation failures follow the configured [`ErrorPolicy`].
///
/// # Errors
///
/// Returns [`TransportError`] on a creation failure under
/// [`ErrorPolicy::Abort`].
pub async fn import_milestones(
    transport: &dyn Transport,
    config: &Config,
    source: &[Milestone],
    existing: &[Milestone],
    summary: &mut RunSummary,
) -> Result<(), TransportError> {
    let span = info_span!("import_milestones", destination = %config.destination());

    async {
        let pending = milestones_to_create(source, existing);
        info!(
            total = source.len(),
            to_create = pending.len(),
            "Importing milestones"
        );

        for milestone in source {
            if !pending.iter().any(|p| std::ptr::eq(*p, milestone)) {
                debug!(title = %milestone.title, "Milestone already exists, skipping");
                summary.record(
                    RecordKind::Milestone,
                    &ImportStatus::Skipped {
                        reason: "title already exists".to_string(),
                    },
                );
            }
        }

        let url = format!("{}/milestones", config.destination_url());
        for milestone in pending {
            let payload = NewMilestone::from(milestone);
            match transport::post::<_, Milestone>(transport, &url, &payload).await {
                Ok(created) => {
                    info!(title = %created.title, number = created.number, "Created milestone");
                    summary.record(RecordKind::Milestone, &ImportStatus::Created);
                }
                Err(e) => match config.milestone_errors() {
                    ErrorPolicy::Continue => {
                        warn!(title = %milestone.title, error = %e, "Failed to create milestone");
                        summary.record(
                            RecordKind::Milestone,
                            &ImportStatus::Failed {
                                error: e.to_string(),
                            },
                        );
                    }
                    ErrorPolicy::Abort => return Err(e),
                },
            }
        }

        Ok(())
    }
    .instrument(span)
    .await
}
