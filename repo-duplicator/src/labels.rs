//! Label listing and creation.

use crate::config::Config;
use crate::models::{Label, NewLabel};
use crate::pagination::{fetch_all, with_page_size};
use crate::reconcile::labels_to_create;
use crate::summary::{ImportStatus, RecordKind, RunSummary};
use crate::transport::{self, Transport, TransportError};
use tracing::{debug, info, info_span, Instrument};

/// Fetches every label of a repository.
///
/// # Errors
///
/// Returns [`TransportError`] if a page request fails.
pub async fn fetch_labels(
    transport: &dyn Transport,
    repo_url: &str,
) -> Result<Vec<Label>, TransportError> {
    fetch_all(transport, &with_page_size(&format!("{repo_url}/labels"))).await
}

/// Creates source labels whose names don't exist in the destination yet.
///
/// # Errors
///
/// Returns [`TransportError`] on the first failed creation.
pub async fn import_labels(
    transport: &dyn Transport,
    config: &Config,
    source: &[Label],
    existing: &[Label],
    summary: &mut RunSummary,
) -> Result<(), TransportError> {
    let span = info_span!("import_labels", destination = %config.destination());

    async {
        let pending = labels_to_create(source, existing);
        info!(
            total = source.len(),
            to_create = pending.len(),
            "Importing labels"
        );

        for label in source {
            if !pending.iter().any(|p| std::ptr::eq(*p, label)) {
                debug!(name = %label.name, "Label already exists, skipping");
                summary.record(
                    RecordKind::Label,
                    &ImportStatus::Skipped {
                        reason: "name already exists".to_string(),
                    },
                );
            }
        }

        let url = format!("{}/labels", config.destination_url());
        for label in pending {
            let created: Label = transport::post(transport, &url, &NewLabel::from(label)).await?;
            info!(name = %created.name, "Created label");
            summary.record(RecordKind::Label, &ImportStatus::Created);
        }

        Ok(())
    }
    .instrument(span)
    .await
}
