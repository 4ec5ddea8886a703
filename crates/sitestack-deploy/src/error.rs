//! Deploy error types.

use sitestack_synth::SynthError;

/// Errors raised while applying or destroying a stack.
#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    /// An AWS API call failed.
    #[error("{operation} failed: {message}")]
    Api {
        /// The API operation that failed.
        operation: &'static str,
        /// The rendered SDK error.
        message: String,
    },

    /// A declaration could not be translated into a valid API request.
    #[error("invalid resource declaration: {0}")]
    InvalidSpec(String),

    /// An API response was missing an expected field.
    #[error("unexpected response from {operation}: {message}")]
    UnexpectedResponse {
        /// The API operation whose response was malformed.
        operation: &'static str,
        /// What was missing.
        message: String,
    },

    /// A referenced resource was not found in the stack or state.
    #[error("unknown resource reference: {0}")]
    UnknownResource(String),

    /// No state file exists for the stack being destroyed.
    #[error("no deployment state found for stack {0}; nothing to destroy")]
    NoState(String),

    /// Token resolution failed.
    #[error(transparent)]
    Synth(#[from] SynthError),

    /// Local filesystem failure (asset walking, state file).
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization failure (policies, state file).
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl DeployError {
    /// Wrap an SDK call error with its operation name.
    pub(crate) fn api(operation: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Api {
            operation,
            message: err.to_string(),
        }
    }

    /// Wrap an SDK builder error.
    pub(crate) fn spec(err: impl std::fmt::Display) -> Self {
        Self::InvalidSpec(err.to_string())
    }

    /// A missing field in an API response.
    pub(crate) fn missing(operation: &'static str, field: &str) -> Self {
        Self::UnexpectedResponse {
            operation,
            message: format!("missing {field}"),
        }
    }
}
