//! Runner error types.

/// Errors that can occur while running a duplication pass.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Invalid configuration.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// Request failures that abort the run.
    #[error(transparent)]
    Transport(#[from] crate::transport::TransportError),
}
