//! Octocrab-backed transport.

use super::{Headers, Method, Response, Transport, TransportError};
use crate::config::Config;
use async_trait::async_trait;
use base64::{prelude::BASE64_STANDARD, Engine};
use http::header::AUTHORIZATION;
use octocrab::Octocrab;
use serde_json::Value;
use tracing::debug;

/// Sends requests through an authenticated [`Octocrab`] client.
///
/// Raw requests are used instead of the typed octocrab APIs so that the
/// status code and the `Link` header stay visible to the caller.
#[derive(Clone)]
pub struct GitHubTransport {
    octocrab: Octocrab,
}

impl GitHubTransport {
    /// Builds a client using the configured API root and basic credentials.
    ///
    /// The credentials go on every request as a default header. Octocrab's own
    /// auth is only attached for `api.github.com`, which would leave
    /// Enterprise hosts and absolute page links unauthenticated.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if the client cannot be constructed.
    pub fn new(config: &Config) -> Result<Self, TransportError> {
        let octocrab = Octocrab::builder()
            .base_uri(config.api_url())?
            .add_header(
                AUTHORIZATION,
                basic_credentials(config.username(), config.password()),
            )
            .build()?;
        Ok(Self::from_octocrab(octocrab))
    }

    /// Wraps an already configured client.
    ///
    /// The client must carry its own credentials.
    #[must_use]
    pub fn from_octocrab(octocrab: Octocrab) -> Self {
        Self { octocrab }
    }
}

/// Builds the value of a Basic `Authorization` header.
fn basic_credentials(username: &str, password: &str) -> String {
    let encoded = BASE64_STANDARD.encode(format!("{username}:{password}"));
    format!("Basic {encoded}")
}

#[async_trait]
impl Transport for GitHubTransport {
    async fn send(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
    ) -> Result<Response, TransportError> {
        debug!(%method, url, "Sending request");

        let response = match method {
            Method::Get => self.octocrab._get(url).await?,
            Method::Post => self.octocrab._post(url, body).await?,
            Method::Patch => self.octocrab._patch(url, body).await?,
        };

        let status = response.status();
        let mut headers = Headers::new();
        for (name, value) in response.headers() {
            if let Ok(value) = value.to_str() {
                headers.insert(name.as_str(), value);
            }
        }

        let text = self.octocrab.body_to_string(response).await?;
        if !status.is_success() {
            return Err(TransportError::Status {
                method: method.as_str(),
                url: url.to_string(),
                status: status.as_u16(),
                body: text,
            });
        }

        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).map_err(|source| TransportError::Decode {
                url: url.to_string(),
                source,
            })?
        };

        Ok(Response { body, headers })
    }
}
