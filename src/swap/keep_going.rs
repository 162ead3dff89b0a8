//! `--keep-going` pushes a commit as far down the stack as it will go;
//! `--up` is its symmetric counterpart, walking a target commit up past
//! the commits above it. Both stop cleanly on `SwapFailed` or `Stop`.

use crate::engine::{Continuation, EngineError, EngineResult, Flow, ResumeKind};
use crate::ops::pick_cherries;
use crate::vcs::{GitError, Repo};

use super::swap_or_squash;

fn finish(repo: &Repo, edit: bool, baselines: Vec<String>, result: EngineResult<()>) -> EngineResult<()> {
    match result {
        Err(Flow::Error(EngineError::Swap(_))) => Ok(()),
        Err(Flow::Resume(ResumeKind::Stop)) => Ok(()),
        Err(Flow::Suspend(mut s)) => {
            s.continuations.push(Continuation::KeepGoing { edit, baselines });
            Err(Flow::Suspend(s))
        }
        Err(other) => Err(other),
        Ok(()) => {
            let a = repo.commit("HEAD")?;
            let parent = match repo.unique_parent(&a) {
                Ok(parent) => parent,
                Err(e) => match e.downcast_ref::<GitError>() {
                    Some(GitError::MergeFound { .. }) => None,
                    _ => return Err(Flow::from(e)),
                },
            };
            let Some(parent) = parent else {
                return Ok(());
            };
            repo.checkout(&parent.sha)?;
            let baselines_for_recurse = baselines.clone();
            let baselines_for_swap = baselines.clone();
            pick_cherries::enter(repo, vec![a.sha.clone()], edit, move |repo| {
                enter(repo, edit, baselines_for_recurse.clone(), move |repo| {
                    swap_or_squash(repo, edit, &baselines_for_swap)
                })
            })
        }
    }
}

/// Enter a fresh `KeepGoing` scope around a `swap_or_squash` body.
pub fn enter(
    repo: &Repo,
    edit: bool,
    baselines: Vec<String>,
    body: impl FnOnce(&Repo) -> EngineResult<()>,
) -> EngineResult<()> {
    let result = body(repo);
    finish(repo, edit, baselines, result)
}

pub fn resume(
    repo: &Repo,
    edit: bool,
    baselines: Vec<String>,
    injected: Option<ResumeKind>,
    tail: impl FnOnce(&Repo, Option<ResumeKind>) -> EngineResult<()>,
) -> EngineResult<()> {
    let result = tail(repo, injected);
    finish(repo, edit, baselines, result)
}

/// Walk `cherries` from the innermost (nearest the `--up` target) outward,
/// cherry-picking each and attempting a swap to carry the target past it.
/// Unlike `KeepGoing`, a `Stop` here is not absorbed -- it unwinds to
/// whatever wraps the whole `--up` walk (`SingleSwap` in the non-keep-going
/// case).
fn run(repo: &Repo, edit: bool, mut cherries: Vec<String>) -> EngineResult<()> {
    if cherries.is_empty() {
        return Ok(());
    }
    let cherry = cherries.remove(0);
    let result = pick_cherries::cherry_pick(repo, &cherry, edit)
        .and_then(|()| swap_or_squash(repo, edit, &[]));
    match result {
        Ok(()) => run(repo, edit, cherries),
        Err(Flow::Error(EngineError::Swap(_))) => Err(Flow::Resume(ResumeKind::Stop)),
        Err(Flow::Suspend(mut s)) => {
            s.continuations.push(Continuation::KeepGoingUp { edit, cherries });
            Err(Flow::Suspend(s))
        }
        Err(other) => Err(other),
    }
}

/// Enter a fresh `KeepGoingUp` scope: check out `target`, then walk `cherries`.
pub fn enter_up(repo: &Repo, edit: bool, target: &str, cherries: Vec<String>) -> EngineResult<()> {
    repo.checkout(target)?;
    run(repo, edit, cherries)
}

pub fn resume_up(
    repo: &Repo,
    edit: bool,
    cherries: Vec<String>,
    injected: Option<ResumeKind>,
    tail: impl FnOnce(&Repo, Option<ResumeKind>) -> EngineResult<()>,
) -> EngineResult<()> {
    match tail(repo, injected) {
        Ok(()) => run(repo, edit, cherries),
        Err(Flow::Error(EngineError::Swap(_))) => Err(Flow::Resume(ResumeKind::Stop)),
        Err(Flow::Suspend(mut s)) => {
            s.continuations.push(Continuation::KeepGoingUp { edit, cherries });
            Err(Flow::Suspend(s))
        }
        Err(other) => Err(other),
    }
}
