//! Error types for flowrelay-core.
//!
//! Uses `thiserror` for structured, matchable variants. [`ConfigError`] is
//! startup-fatal; [`FlowError`] covers a single failed call to the flow engine.

use thiserror::Error;

/// Configuration could not be resolved at startup.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required environment variable is unset or blank.
    #[error("{0} environment variable is required")]
    MissingVar(&'static str),

    /// An environment variable is set but cannot be used.
    #[error("invalid value '{value}' for {name}: {reason}")]
    InvalidVar {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// A call to the flow engine failed.
///
/// Shape mismatches in a successful response are not errors; they are handled
/// by the extractor's fallback.
#[derive(Debug, Error)]
pub enum FlowError {
    /// The flow engine answered with a non-2xx status.
    #[error("upstream returned HTTP {status}: {body}")]
    UpstreamHttp { status: u16, body: String },

    /// The flow engine could not be reached or did not answer in time.
    #[error("upstream unreachable: {0}")]
    UpstreamUnreachable(String),

    /// The flow engine answered 2xx with a body that is not JSON.
    #[error("malformed upstream response: {0}")]
    MalformedResponse(String),

    /// The HTTP client itself could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(String),
}

impl FlowError {
    /// HTTP status reported by the flow engine, if it answered at all.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            FlowError::UpstreamHttp { status, .. } => Some(*status),
            _ => None,
        }
    }
}
