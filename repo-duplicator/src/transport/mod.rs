//! Authenticated HTTP access to the REST API.
//!
//! Everything above this module talks to the API through the [`Transport`]
//! trait, one request at a time. [`GitHubTransport`] is the real
//! implementation; tests plug in an in-memory one.

mod error;
mod github;

pub use error::TransportError;
pub use github::GitHubTransport;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// HTTP methods used by the duplicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Patch,
}

impl Method {
    /// Returns the method name as sent on the wire.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw response headers, in the order the server sent them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers(Vec<(String, String)>);

impl Headers {
    /// Creates an empty header set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a header.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.push((name.into(), value.into()));
    }

    /// Returns the first value of a header, matching the name case-insensitively.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// A parsed response: JSON body plus raw headers.
#[derive(Debug, Clone)]
pub struct Response {
    /// Parsed body; `Null` for empty bodies.
    pub body: Value,

    /// Response headers.
    pub headers: Headers,
}

/// Issues one authenticated request against the REST API.
///
/// Implementations must return [`TransportError::Status`] for non-success
/// responses so callers can tell a 404 from other failures.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends a request with an optional JSON body.
    async fn send(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
    ) -> Result<Response, TransportError>;
}

/// Fetches a single resource and decodes it.
///
/// Returns the decoded body together with the response headers.
///
/// # Errors
///
/// Returns [`TransportError`] if the request fails or the body doesn't decode.
pub async fn get<T: DeserializeOwned>(
    transport: &dyn Transport,
    url: &str,
) -> Result<(T, Headers), TransportError> {
    let response = transport.send(Method::Get, url, None).await?;
    let value = decode(url, response.body)?;
    Ok((value, response.headers))
}

/// Creates a resource and decodes the created representation.
///
/// # Errors
///
/// Returns [`TransportError`] if the request fails or the body doesn't decode.
pub async fn post<B, T>(transport: &dyn Transport, url: &str, payload: &B) -> Result<T, TransportError>
where
    B: Serialize + ?Sized,
    T: DeserializeOwned,
{
    let body = encode(url, payload)?;
    let response = transport.send(Method::Post, url, Some(&body)).await?;
    decode(url, response.body)
}

/// Partially updates a resource and decodes the updated representation.
///
/// # Errors
///
/// Returns [`TransportError`] if the request fails or the body doesn't decode.
pub async fn patch<B, T>(transport: &dyn Transport, url: &str, payload: &B) -> Result<T, TransportError>
where
    B: Serialize + ?Sized,
    T: DeserializeOwned,
{
    let body = encode(url, payload)?;
    let response = transport.send(Method::Patch, url, Some(&body)).await?;
    decode(url, response.body)
}

fn encode<B: Serialize + ?Sized>(url: &str, payload: &B) -> Result<Value, TransportError> {
    serde_json::to_value(payload).map_err(|source| TransportError::Encode {
        url: url.to_string(),
        source,
    })
}

fn decode<T: DeserializeOwned>(url: &str, body: Value) -> Result<T, TransportError> {
    serde_json::from_value(body).map_err(|source| TransportError::Decode {
        url: url.to_string(),
        source,
    })
}
