//! Error kinds the driver distinguishes when picking an exit code.

/// Errors that are not signals: preconditions, VCS failures, and the
/// swap-specific flow-control failure.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A precondition was violated (dirty worktree, operation already in
    /// progress, wrong tool resuming, unknown continuation kind, ...).
    #[error("{0}")]
    User(String),

    /// Expected flow-control for swap boundaries: a merge or baseline was
    /// hit while walking the commit chain.
    #[error("{0}")]
    Swap(String),

    /// The VCS binary exited non-zero, or some other adapter-level
    /// failure. Wraps the underlying `anyhow::Error` (usually a
    /// `vcs::GitError`) so callers can still `downcast_ref` it.
    #[error(transparent)]
    Vcs(#[from] anyhow::Error),
}
