//! Cross-repository reconciliation.
//!
//! Pure decisions over already fetched records: which source records still
//! need creating, how source issues map onto destination issues, and which
//! destination milestone a source issue should point at. Nothing in here
//! performs I/O.

mod marker;

pub use marker::{append_marker, find_marker, source_marker};

use crate::config::{MatchStrategy, RepoSlug};
use crate::models::{Issue, Label, Milestone, NewIssue};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Decision for a single source issue during the create pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueAction<'a> {
    /// Create the issue in the destination.
    Create(&'a Issue),

    /// Leave the issue alone.
    Skip {
        /// The source issue.
        issue: &'a Issue,
        /// Why it was skipped.
        reason: String,
    },
}

/// Merges closed and open issues into one list sorted by issue number.
///
/// Both passes and both repositories must go through this function so that
/// positional matching sees the same ordering every time.
#[must_use]
pub fn merge_issues(closed: Vec<Issue>, open: Vec<Issue>) -> Vec<Issue> {
    let mut issues = closed;
    issues.extend(open);
    issues.sort_by_key(|issue| issue.number);
    issues
}

/// Returns the source labels whose names are not yet used in the destination.
///
/// Names are compared case-sensitively. A name repeated in the source list is
/// only returned once.
#[must_use]
pub fn labels_to_create<'a>(source: &'a [Label], existing: &[Label]) -> Vec<&'a Label> {
    let mut taken: HashSet<&str> = existing.iter().map(|label| label.name.as_str()).collect();
    source
        .iter()
        .filter(|label| taken.insert(label.name.as_str()))
        .collect()
}

/// Returns the source milestones whose titles are not yet used in the destination.
#[must_use]
pub fn milestones_to_create<'a>(
    source: &'a [Milestone],
    existing: &[Milestone],
) -> Vec<&'a Milestone> {
    let mut taken: HashSet<&str> = existing.iter().map(|m| m.title.as_str()).collect();
    source
        .iter()
        .filter(|milestone| taken.insert(milestone.title.as_str()))
        .collect()
}

/// Finds the destination milestone number for a source issue's milestone.
///
/// Returns `None` when the issue has no milestone or when no destination
/// milestone carries the same title.
#[must_use]
pub fn resolve_milestone(issue: &Issue, destination: &[Milestone]) -> Option<u64> {
    let title = issue.milestone_title()?;
    let resolved = destination
        .iter()
        .find(|milestone| milestone.title == title)
        .map(|milestone| milestone.number);

    if resolved.is_none() {
        debug!(
            issue_number = issue.number,
            milestone = title,
            "Milestone not found in destination, importing without it"
        );
    }
    resolved
}

/// Builds the creation payload for a source issue.
///
/// When `marker` is set it is appended to the body so the issue can be found
/// again by [`find_marker`].
#[must_use]
pub fn issue_payload(
    source: &Issue,
    destination_milestones: &[Milestone],
    marker: Option<&str>,
) -> NewIssue {
    let body = match marker {
        Some(marker) => Some(append_marker(source.body.as_deref(), marker)),
        None => source.body.clone(),
    };

    NewIssue {
        title: source.title.clone(),
        body,
        assignee: source.assignee_login().map(str::to_string),
        milestone: resolve_milestone(source, destination_milestones),
        labels: source.label_names(),
    }
}

/// Decides which source issues to create in the destination.
///
/// With [`MatchStrategy::Position`] a source issue is skipped when a
/// destination issue exists at the same index and the source issue has no
/// comments. Issues with comments are always imported again.
///
/// With [`MatchStrategy::Marker`] a source issue is skipped when some
/// destination issue carries its marker.
#[must_use]
pub fn plan_issue_imports<'a>(
    source: &'a [Issue],
    destination: &[Issue],
    strategy: MatchStrategy,
    source_repo: &RepoSlug,
) -> Vec<IssueAction<'a>> {
    match strategy {
        MatchStrategy::Position => source
            .iter()
            .enumerate()
            .map(|(index, issue)| {
                if index < destination.len() && !issue.has_comments() {
                    IssueAction::Skip {
                        issue,
                        reason: format!("destination already has an issue at position {}", index + 1),
                    }
                } else {
                    IssueAction::Create(issue)
                }
            })
            .collect(),
        MatchStrategy::Marker => {
            let imported = marked_numbers(destination, source_repo);
            source
                .iter()
                .map(|issue| match imported.get(&issue.number) {
                    Some(existing) => IssueAction::Skip {
                        issue,
                        reason: format!("already duplicated as #{}", existing.number),
                    },
                    None => IssueAction::Create(issue),
                })
                .collect()
        }
    }
}

/// Pairs each source issue with its destination counterpart for the update pass.
///
/// With [`MatchStrategy::Position`] the lists are zipped; unpaired issues on
/// the longer side are dropped. With [`MatchStrategy::Marker`] source issues
/// without a marked destination issue are dropped.
#[must_use]
pub fn pair_issues<'a>(
    source: &'a [Issue],
    destination: &'a [Issue],
    strategy: MatchStrategy,
    source_repo: &RepoSlug,
) -> Vec<(&'a Issue, &'a Issue)> {
    match strategy {
        MatchStrategy::Position => {
            if source.len() != destination.len() {
                debug!(
                    source = source.len(),
                    destination = destination.len(),
                    "Issue counts differ, surplus issues are not updated"
                );
            }
            source.iter().zip(destination.iter()).collect()
        }
        MatchStrategy::Marker => {
            let imported = marked_numbers(destination, source_repo);
            source
                .iter()
                .filter_map(|issue| imported.get(&issue.number).map(|dest| (issue, *dest)))
                .collect()
        }
    }
}

/// Indexes destination issues by the source number in their marker.
///
/// If several destination issues carry the same marker the lowest numbered
/// one wins.
fn marked_numbers<'a>(destination: &'a [Issue], source_repo: &RepoSlug) -> HashMap<u64, &'a Issue> {
    let mut imported: HashMap<u64, &'a Issue> = HashMap::new();
    for issue in destination {
        let Some(source_number) = issue
            .body
            .as_deref()
            .and_then(|body| find_marker(body, source_repo))
        else {
            continue;
        };
        imported
            .entry(source_number)
            .and_modify(|current| {
                if issue.number < current.number {
                    *current = issue;
                }
            })
            .or_insert(issue);
    }
    imported
}
