//! Error types for apiref.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level result type for apiref operations.
pub type Result<T> = std::result::Result<T, ApirefError>;

/// Top-level error type for apiref.
#[derive(Debug, Error)]
pub enum ApirefError {
    #[error("route error: {0}")]
    Route(#[from] RouteError),

    #[error("config error: {0}")]
    Config(String),

    #[error("{action} {}: {source}", path.display())]
    Fs {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApirefError {
    /// Wrap an I/O error with the operation and path it failed on.
    pub fn fs(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Fs {
            action,
            path: path.into(),
            source,
        }
    }
}

/// Errors raised while reading the route descriptor of a generated page.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("{} has no route line", path.display())]
    MissingRouteLine { path: PathBuf },

    #[error("unexpected route name format: {0}")]
    UnexpectedFormat(String),

    #[error("unexpected route name format: {route} (expected at least three path segments)")]
    TooFewSegments { route: String },

    #[error("unexpected route name format: {route} (segment {segment:?} would leave the route directory)")]
    UnsafeSegment { route: String, segment: String },
}
