//! Error types shared across SiteStack crates.

/// Core error type for SiteStack.
#[derive(Debug, thiserror::Error)]
pub enum SiteStackError {
    /// Invalid AWS account ID format.
    #[error("invalid AWS account ID: {0} (must be 12-digit numeric string)")]
    InvalidAccountId(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal error with context.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Convenience result type for SiteStack operations.
pub type SiteStackResult<T> = Result<T, SiteStackError>;
