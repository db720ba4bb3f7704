//! Orchestrates the create and update passes.

mod error;

pub use error::RunnerError;

use crate::config::{Config, Pass};
use crate::issues::{fetch_issues, import_issues};
use crate::labels::{fetch_labels, import_labels};
use crate::milestones::{fetch_milestones, import_milestones};
use crate::summary::RunSummary;
use crate::transport::{GitHubTransport, Transport};
use crate::updater::update_issues;
use std::sync::Arc;
use tracing::{info, info_span, Instrument};

/// Runs one pass of the duplication from source to destination.
pub struct Runner {
    config: Config,
    transport: Arc<dyn Transport>,
}

impl Runner {
    /// Builds a runner talking to GitHub with the configured credentials.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError`] if the HTTP client cannot be constructed.
    pub fn new(config: Config) -> Result<Self, RunnerError> {
        let transport = GitHubTransport::new(&config)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Builds a runner on top of an arbitrary transport.
    pub fn with_transport(config: Config, transport: Arc<dyn Transport>) -> Self {
        Self { config, transport }
    }

    /// Executes the configured pass.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError`] on the first failure that isn't tolerated.
    pub async fn run(&self) -> Result<RunSummary, RunnerError> {
        let span = info_span!(
            "run",
            pass = %self.config.pass(),
            source = %self.config.source(),
            destination = %self.config.destination()
        );

        async {
            let mut summary = RunSummary::new(self.config.pass());
            match self.config.pass() {
                Pass::Create => self.create_pass(&mut summary).await?,
                Pass::Update => self.update_pass(&mut summary).await?,
            }
            info!("Pass complete");
            Ok(summary)
        }
        .instrument(span)
        .await
    }

    async fn create_pass(&self, summary: &mut RunSummary) -> Result<(), RunnerError> {
        let transport = self.transport.as_ref();
        let source_url = self.config.source_url();
        let destination_url = self.config.destination_url();

        info!("Fetching milestones and labels");
        let milestones = fetch_milestones(transport, &source_url).await?;
        let labels = fetch_labels(transport, &source_url).await?;
        let existing_milestones = fetch_milestones(transport, &destination_url).await?;
        let existing_labels = fetch_labels(transport, &destination_url).await?;

        import_milestones(
            transport,
            &self.config,
            &milestones,
            &existing_milestones,
            summary,
        )
        .await?;
        import_labels(transport, &self.config, &labels, &existing_labels, summary).await?;

        // Issues reference milestones by destination number, so re-read them
        // after creation.
        let destination_milestones = fetch_milestones(transport, &destination_url).await?;

        info!("Fetching issues");
        let issues = fetch_issues(transport, &source_url).await?;
        let existing_issues = fetch_issues(transport, &destination_url).await?;
        import_issues(
            transport,
            &self.config,
            &issues,
            &existing_issues,
            &destination_milestones,
            summary,
        )
        .await?;

        Ok(())
    }

    async fn update_pass(&self, summary: &mut RunSummary) -> Result<(), RunnerError> {
        let transport = self.transport.as_ref();

        info!("Fetching issues");
        let issues = fetch_issues(transport, &self.config.source_url()).await?;
        let existing_issues = fetch_issues(transport, &self.config.destination_url()).await?;
        update_issues(transport, &self.config, &issues, &existing_issues, summary).await?;

        Ok(())
    }
}
