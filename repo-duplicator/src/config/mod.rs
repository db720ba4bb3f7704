//! Run configuration.
//!
//! A [`Config`] is built once at startup from the command line and borrowed
//! by every component that needs endpoints or credentials.

mod error;
mod options;
mod repository;

pub use error::ConfigError;
pub use options::{ErrorPolicy, MatchStrategy, Pass};
pub use repository::RepoSlug;

use url::Url;

/// Default GitHub REST API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Configuration for a single duplication run.
#[derive(Clone)]
pub struct Config {
    /// GitHub username for basic authentication.
    username: String,
    /// GitHub password (or personal access token) for basic authentication.
    password: String,
    /// Repository to copy from.
    source: RepoSlug,
    /// Repository to copy to.
    destination: RepoSlug,
    /// Root of the REST API, without a trailing slash.
    api_url: String,
    /// Pass to run.
    pass: Pass,
    /// Issue matching strategy.
    match_strategy: MatchStrategy,
    /// Milestone creation failure policy.
    milestone_errors: ErrorPolicy,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("source", &self.source)
            .field("destination", &self.destination)
            .field("api_url", &self.api_url)
            .field("pass", &self.pass)
            .field("match_strategy", &self.match_strategy)
            .field("milestone_errors", &self.milestone_errors)
            .finish()
    }
}

impl Config {
    /// Creates a new configuration against the public GitHub API.
    pub fn new(
        username: String,
        password: String,
        source: RepoSlug,
        destination: RepoSlug,
        pass: Pass,
    ) -> Self {
        Self {
            username,
            password,
            source,
            destination,
            api_url: DEFAULT_API_URL.to_string(),
            pass,
            match_strategy: MatchStrategy::default(),
            milestone_errors: ErrorPolicy::default(),
        }
    }

    /// Sets a custom API root, e.g. for GitHub Enterprise.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the URL cannot be parsed or is not a base URL.
    pub fn with_api_url(mut self, api_url: &str) -> Result<Self, ConfigError> {
        let parsed = Url::parse(api_url).map_err(|source| ConfigError::InvalidApiUrl {
            value: api_url.to_string(),
            source,
        })?;
        if parsed.cannot_be_a_base() {
            return Err(ConfigError::UnsupportedApiUrl {
                value: api_url.to_string(),
            });
        }
        self.api_url = parsed.as_str().trim_end_matches('/').to_string();
        Ok(self)
    }

    /// Sets the issue matching strategy.
    pub fn with_match_strategy(mut self, match_strategy: MatchStrategy) -> Self {
        self.match_strategy = match_strategy;
        self
    }

    /// Sets the milestone creation failure policy.
    pub fn with_milestone_errors(mut self, policy: ErrorPolicy) -> Self {
        self.milestone_errors = policy;
        self
    }

    /// Returns the username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the password.
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Returns the source repository.
    pub fn source(&self) -> &RepoSlug {
        &self.source
    }

    /// Returns the destination repository.
    pub fn destination(&self) -> &RepoSlug {
        &self.destination
    }

    /// Returns the API root.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Returns the selected pass.
    pub fn pass(&self) -> Pass {
        self.pass
    }

    /// Returns the issue matching strategy.
    pub fn match_strategy(&self) -> MatchStrategy {
        self.match_strategy
    }

    /// Returns the milestone creation failure policy.
    pub fn milestone_errors(&self) -> ErrorPolicy {
        self.milestone_errors
    }

    /// Returns the REST root of the source repository.
    #[must_use]
    pub fn source_url(&self) -> String {
        self.repo_url(&self.source)
    }

    /// Returns the REST root of the destination repository.
    #[must_use]
    pub fn destination_url(&self) -> String {
        self.repo_url(&self.destination)
    }

    fn repo_url(&self, repo: &RepoSlug) -> String {
        format!("{}/repos/{}/{}", self.api_url, repo.owner, repo.name)
    }
}
