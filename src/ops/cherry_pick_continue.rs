//! Installed whenever a cherry-pick conflicts and the user opted into
//! `--edit`. On resume, finishes the conflicted pick: continues it if the
//! index is clean, or re-suspends if unmerged files remain.

use crate::engine::{Continuation, EngineResult, Flow, ResumeKind, Suspend};
use crate::vcs::Repo;

fn after_success(repo: &Repo, reference: &str) -> EngineResult<()> {
    if repo.cherry_pick_in_progress() {
        if repo.has_unmerged_files()? {
            eprintln!("The index still has unmerged files.");
            return Err(Flow::Suspend(Suspend::new(Some(format!(
                "cherry-picking {reference}"
            )))));
        }
        repo.run(&["cherry-pick", "--continue"])?;
    }
    Ok(())
}

fn finish(repo: &Repo, reference: String, result: EngineResult<()>) -> EngineResult<()> {
    let result = match result {
        Ok(()) => after_success(repo, &reference),
        Err(other) => Err(other),
    };
    match result {
        Ok(()) => Ok(()),
        Err(Flow::Suspend(mut s)) => {
            s.continuations.push(Continuation::CherryPickContinue { reference });
            Err(Flow::Suspend(s))
        }
        Err(other) => {
            repo.cherry_pick_abort()?;
            Err(other)
        }
    }
}

pub fn enter(
    repo: &Repo,
    reference: String,
    body: impl FnOnce(&Repo) -> EngineResult<()>,
) -> EngineResult<()> {
    let result = body(repo);
    finish(repo, reference, result)
}

pub fn resume(
    repo: &Repo,
    reference: String,
    injected: Option<ResumeKind>,
    tail: impl FnOnce(&Repo, Option<ResumeKind>) -> EngineResult<()>,
) -> EngineResult<()> {
    let result = tail(repo, injected);
    finish(repo, reference, result)
}
