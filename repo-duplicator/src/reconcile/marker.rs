//! Source markers embedded in duplicated issue bodies.
//!
//! A marker is an HTML comment, invisible in rendered markdown, naming the
//! source repository and issue number: `<!-- duplicated-from: owner/repo#12 -->`.

use crate::config::RepoSlug;

const MARKER_PREFIX: &str = "<!-- duplicated-from: ";
const MARKER_SUFFIX: &str = " -->";

/// Builds the marker for a source issue.
#[must_use]
pub fn source_marker(repo: &RepoSlug, number: u64) -> String {
    format!("{MARKER_PREFIX}{repo}#{number}{MARKER_SUFFIX}")
}

/// Appends the marker to an issue body.
#[must_use]
pub fn append_marker(body: Option<&str>, marker: &str) -> String {
    match body {
        Some(body) if !body.is_empty() => format!("{body}\n\n{marker}"),
        _ => marker.to_string(),
    }
}

/// Finds the source issue number recorded in a body for the given repository.
///
/// The last matching marker wins, since markers are appended.
#[must_use]
pub fn find_marker(body: &str, repo: &RepoSlug) -> Option<u64> {
    let prefix = format!("{MARKER_PREFIX}{repo}#");
    body.rmatch_indices(&prefix).find_map(|(start, _)| {
        let rest = &body[start + prefix.len()..];
        let end = rest.find(MARKER_SUFFIX)?;
        rest[..end].trim().parse().ok()
    })
}
