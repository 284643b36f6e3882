//! Error types for orgdash.
//!
//! Library crates use [`OrgDashError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all orgdash operations.
#[derive(Debug, thiserror::Error)]
pub enum OrgDashError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Transport-level HTTP failure (connect, TLS, timeout, body read).
    #[error("network error: {0}")]
    Network(String),

    /// The forge API answered with a non-success status.
    #[error("API error: {url} returned HTTP {status}")]
    Api { status: u16, url: String },

    /// Response body or document parsing error.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Data validation error (missing section, malformed input, etc.).
    #[error("validation error: {message}")]
    Validation { message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, OrgDashError>;

impl OrgDashError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a parse error from any displayable message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Create an API status error for a request URL.
    pub fn api(status: u16, url: impl Into<String>) -> Self {
        Self::Api {
            status,
            url: url.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// HTTP status code carried by an [`OrgDashError::Api`] error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = OrgDashError::config("GITHUB_TOKEN is not set");
        assert_eq!(err.to_string(), "config error: GITHUB_TOKEN is not set");

        let err = OrgDashError::validation("heading not found");
        assert!(err.to_string().contains("heading not found"));
    }

    #[test]
    fn api_error_carries_status_code() {
        let err = OrgDashError::api(404, "https://api.github.com/orgs/acme/repos?page=1");
        assert_eq!(err.status(), Some(404));
        assert!(err.to_string().contains("HTTP 404"));
        assert_eq!(OrgDashError::Network("timeout".into()).status(), None);
    }
}
