//! Finishes a swap pair: once the now-first commit has been picked,
//! reuses the tree built by the `reference` commit's cherry-pick so the
//! user resolves conflicts only once, not twice.

use crate::engine::{Continuation, EngineResult, Flow, ResumeKind};
use crate::vcs::Repo;

fn finish(repo: &Repo, cherry: String, reference: String, result: EngineResult<()>) -> EngineResult<()> {
    match result {
        Ok(()) => {
            repo.run(&["read-tree", &reference])?;
            repo.run(&["commit", "--allow-empty", "--reuse-message", &cherry])?;
            repo.run(&["reset", "--hard", "HEAD"])?;
            Ok(())
        }
        Err(Flow::Suspend(mut s)) => {
            s.continuations.push(Continuation::PickCherryWithReference { cherry, reference });
            Err(Flow::Suspend(s))
        }
        Err(other) => Err(other),
    }
}

pub fn enter(
    repo: &Repo,
    cherry: String,
    reference: String,
    body: impl FnOnce(&Repo) -> EngineResult<()>,
) -> EngineResult<()> {
    let result = body(repo);
    finish(repo, cherry, reference, result)
}

pub fn resume(
    repo: &Repo,
    cherry: String,
    reference: String,
    injected: Option<ResumeKind>,
    tail: impl FnOnce(&Repo, Option<ResumeKind>) -> EngineResult<()>,
) -> EngineResult<()> {
    let result = tail(repo, injected);
    finish(repo, cherry, reference, result)
}
