//! Records the HEAD a swap started from. On failure, force-checks-out back
//! to it so a broken rewrite never leaves the branch pointing somewhere
//! half-rebuilt.

use crate::engine::{Continuation, EngineResult, Flow, ResumeKind};
use crate::vcs::Repo;

fn finish(repo: &Repo, head: String, result: EngineResult<()>) -> EngineResult<()> {
    match result {
        Ok(()) => Ok(()),
        Err(Flow::Suspend(mut s)) => {
            s.continuations.push(Continuation::SwapCheckpoint { head });
            Err(Flow::Suspend(s))
        }
        Err(other) => {
            repo.force_checkout(&head)?;
            Err(other)
        }
    }
}

pub fn enter(repo: &Repo, body: impl FnOnce(&Repo) -> EngineResult<()>) -> EngineResult<()> {
    let head = repo.head()?;
    let result = body(repo);
    finish(repo, head, result)
}

pub fn resume(
    repo: &Repo,
    head: String,
    injected: Option<ResumeKind>,
    tail: impl FnOnce(&Repo, Option<ResumeKind>) -> EngineResult<()>,
) -> EngineResult<()> {
    let result = tail(repo, injected);
    finish(repo, head, result)
}
