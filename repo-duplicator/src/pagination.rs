//! `Link` header pagination.
//!
//! List endpoints return one page of records per request and advertise the
//! following page through a header of the form
//! `<https://...&page=2>; rel="next", <https://...&page=5>; rel="last"`.

use crate::transport::{self, Transport, TransportError};
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Name of the response header carrying link relations.
pub const LINK_HEADER: &str = "link";

/// Page size requested from list endpoints.
pub const PER_PAGE: u8 = 100;

/// A single `<url>; rel="name"` pair from a `Link` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRelation {
    /// Target URL.
    pub url: String,

    /// Relation name, e.g. `next` or `last`.
    pub rel: String,
}

/// Parses a `Link` header value into its relations.
///
/// Each comma-separated descriptor is parsed on its own. A descriptor whose
/// `rel` lists several space-separated names yields one relation per name.
/// Descriptors without an angle-bracketed URL or a `rel` parameter are
/// skipped.
#[must_use]
pub fn parse_link_header(value: &str) -> Vec<LinkRelation> {
    value
        .split(',')
        .filter_map(parse_descriptor)
        .flatten()
        .collect()
}

fn parse_descriptor(descriptor: &str) -> Option<Vec<LinkRelation>> {
    let mut parts = descriptor.split(';');
    let target = parts.next()?.trim();
    let url = target.strip_prefix('<')?.strip_suffix('>')?.trim();
    if url.is_empty() {
        return None;
    }

    let rel = parts.find_map(|param| {
        let (key, value) = param.split_once('=')?;
        key.trim()
            .eq_ignore_ascii_case("rel")
            .then(|| value.trim().trim_matches('"'))
    })?;

    Some(
        rel.split_whitespace()
            .map(|name| LinkRelation {
                url: url.to_string(),
                rel: name.to_ascii_lowercase(),
            })
            .collect(),
    )
}

/// Returns the URL of the `next` relation, if the header has one.
#[must_use]
pub fn next_page_url(value: &str) -> Option<String> {
    parse_link_header(value)
        .into_iter()
        .find(|link| link.rel == "next")
        .map(|link| link.url)
}

/// Fetches every page of a list endpoint, starting at `url`.
///
/// Records are returned in the order the pages and their entries were
/// served. Each call starts again from the first page.
///
/// # Errors
///
/// Returns [`TransportError`] from the first failing page request.
pub async fn fetch_all<T: DeserializeOwned>(
    transport: &dyn Transport,
    url: &str,
) -> Result<Vec<T>, TransportError> {
    let mut records = Vec::new();
    let mut visited = HashSet::new();
    let mut next = Some(url.to_string());

    while let Some(page_url) = next.take() {
        visited.insert(page_url.clone());

        let (page, headers): (Vec<T>, _) = transport::get(transport, &page_url).await?;
        debug!(url = %page_url, count = page.len(), "Fetched page");
        records.extend(page);

        next = headers.get(LINK_HEADER).and_then(next_page_url);
        if let Some(candidate) = &next {
            if visited.contains(candidate) {
                warn!(url = %candidate, "Next page was already fetched, stopping");
                next = None;
            }
        }
    }

    Ok(records)
}

/// Appends `per_page` to a list URL's query.
#[must_use]
pub fn with_page_size(url: &str) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}per_page={PER_PAGE}")
}
