//! Synthesis error types.

/// Errors raised while assembling a stack.
#[derive(Debug, thiserror::Error)]
pub enum SynthError {
    /// A logical ID was declared twice within one stack.
    #[error("duplicate logical ID in stack: {0}")]
    DuplicateLogicalId(String),

    /// An output name was declared twice within one stack.
    #[error("duplicate output in stack: {0}")]
    DuplicateOutput(String),

    /// The asset directory is missing or not a directory.
    #[error("asset directory not found or not readable: {path}")]
    AssetDirectory {
        /// The path that was checked.
        path: String,
    },

    /// A token string did not match the `${kind:id}` grammar.
    #[error("malformed token in value: {0}")]
    MalformedToken(String),

    /// A token had no resolved value at deploy time.
    #[error("unresolved token: {0}")]
    UnresolvedToken(String),
}
