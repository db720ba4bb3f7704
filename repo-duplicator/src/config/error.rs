//! Configuration error types.

use thiserror::Error;

/// Errors that can occur while building a run configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Repository identifier is not in `owner/repo` form.
    #[error("Invalid repository '{value}': expected 'owner/repo'")]
    InvalidRepository { value: String },

    /// API base URL could not be parsed.
    #[error("Invalid API URL '{value}': {source}")]
    InvalidApiUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },

    /// API base URL parsed but cannot be used as a base.
    #[error("API URL '{value}' cannot be used as a base URL")]
    UnsupportedApiUrl { value: String },

    /// Unknown value for an enumerated option.
    #[error("Invalid value '{value}' for {option}: expected one of {expected}")]
    InvalidOption {
        option: &'static str,
        value: String,
        expected: &'static str,
    },
}
