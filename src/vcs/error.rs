//! Typed domain errors for the VCS adapter.
//!
//! Use `.into()` to convert a [`GitError`] to `anyhow::Error` at the call
//! site while still being able to `downcast_ref` it further up the stack
//! (the engine needs to distinguish `UserError` from `VcsFailed` to pick an
//! exit code).

#[derive(Debug, Clone, thiserror::Error)]
pub enum GitError {
    /// The current directory is not inside a git repository.
    #[error("not a git repository")]
    NotARepository,

    /// A git invocation exited non-zero. Carries captured, trimmed stderr.
    #[error("{stderr}")]
    VcsFailed { stderr: String },

    /// Output from git could not be parsed into the expected shape.
    #[error("failed to parse git output: {message}")]
    ParseError { message: String },

    /// A merge commit was encountered somewhere a single-parent chain was
    /// required.
    #[error("commit {sha} is a merge")]
    MergeFound { sha: String },
}
