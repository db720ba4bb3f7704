//! Duplicates a GitHub repository's milestones, labels, issues and comments
//! into another repository.
//!
//! A duplication takes two runs. The [create pass](Pass::Create) copies
//! milestones and labels, then creates issues. The [update pass](Pass::Update)
//! copies comments and open/closed state onto the issues created earlier.

pub mod comments;
pub mod config;
pub mod issues;
pub mod labels;
pub mod milestones;
pub mod models;
pub mod pagination;
pub mod reconcile;
pub mod runner;
pub mod summary;
pub mod transport;
pub mod updater;

pub use comments::{create_comment, fetch_comments};
pub use config::{Config, ConfigError, ErrorPolicy, MatchStrategy, Pass, RepoSlug, DEFAULT_API_URL};
pub use issues::{fetch_issues, fetch_issues_by_state, import_issues};
pub use labels::{fetch_labels, import_labels};
pub use milestones::{fetch_milestones, import_milestones};
pub use models::{Comment, Issue, IssueState, Label, Milestone};
pub use pagination::{fetch_all, next_page_url, parse_link_header, LinkRelation};
pub use runner::{Runner, RunnerError};
pub use summary::{ImportStatus, RecordKind, RunSummary, Tally};
pub use transport::{GitHubTransport, Headers, Method, Response, Transport, TransportError};
pub use updater::{update_issue, update_issues};
