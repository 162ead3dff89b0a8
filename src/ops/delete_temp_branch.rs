//! Scope-bound cleanup of an orphan temp branch created by
//! [`super::temp_branch`]. Cleanup runs on both success and failure (it is
//! a `finally`, not a success/failure tail) but is skipped on suspend, like
//! every other continuation.

use crate::engine::{Continuation, EngineResult, Flow, ResumeKind};
use crate::vcs::Repo;

fn cleanup(repo: &Repo, branch: &str, previous_head: &str) -> anyhow::Result<()> {
    if repo.on_orphan_branch()? {
        eprintln!("# reset back to before creating {branch} branch");
        repo.force_checkout(previous_head)?;
    } else {
        repo.detach()?;
    }
    if repo.branch_exists(branch)? {
        repo.run(&["branch", "-qD", branch])?;
    }
    Ok(())
}

fn finish(
    repo: &Repo,
    branch: String,
    previous_head: String,
    result: EngineResult<()>,
) -> EngineResult<()> {
    match result {
        Err(Flow::Suspend(mut s)) => {
            s.continuations.push(Continuation::DeleteTempBranch {
                branch,
                previous_head,
            });
            Err(Flow::Suspend(s))
        }
        other => {
            cleanup(repo, &branch, &previous_head)?;
            other
        }
    }
}

pub fn enter(
    repo: &Repo,
    branch: String,
    previous_head: String,
    body: impl FnOnce(&Repo) -> EngineResult<()>,
) -> EngineResult<()> {
    let result = body(repo);
    finish(repo, branch, previous_head, result)
}

pub fn resume(
    repo: &Repo,
    branch: String,
    previous_head: String,
    injected: Option<ResumeKind>,
    tail: impl FnOnce(&Repo, Option<ResumeKind>) -> EngineResult<()>,
) -> EngineResult<()> {
    let result = tail(repo, injected);
    finish(repo, branch, previous_head, result)
}
