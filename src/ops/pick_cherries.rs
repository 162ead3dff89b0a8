//! Cherry-pick a list of commits one at a time. The remaining (not yet
//! picked) prefix is what gets captured if a pick suspends, so resuming
//! only replays what's left.

use crate::engine::{Continuation, EngineResult, Flow, ResumeKind, Suspend};
use crate::vcs::Repo;

/// Cherry-pick a single commit. On conflict, installs
/// [`super::cherry_pick_continue`] and suspends instead of leaving the
/// repository mid-conflict with no way back in.
pub fn cherry_pick(repo: &Repo, reference: &str, edit: bool) -> EngineResult<()> {
    match repo.run(&["cherry-pick", "--allow-empty", reference]) {
        Ok(_) => Ok(()),
        Err(err) => {
            if edit && repo.cherry_pick_in_progress() {
                let mut suspend = Suspend::new(Some(format!("cherry-picking {reference}")));
                suspend
                    .continuations
                    .push(Continuation::CherryPickContinue {
                        reference: reference.to_string(),
                    });
                Err(Flow::Suspend(suspend))
            } else {
                repo.cherry_pick_abort()?;
                Err(Flow::from(err))
            }
        }
    }
}

fn run_picks(repo: &Repo, mut cherries: Vec<String>, edit: bool) -> EngineResult<()> {
    while !cherries.is_empty() {
        let next = cherries.remove(0);
        if let Err(flow) = cherry_pick(repo, &next, edit) {
            return match flow {
                Flow::Suspend(mut s) => {
                    s.continuations
                        .push(Continuation::PickCherries { cherries, edit });
                    Err(Flow::Suspend(s))
                }
                other => Err(other),
            };
        }
    }
    Ok(())
}

fn finish(repo: &Repo, cherries: Vec<String>, edit: bool, result: EngineResult<()>) -> EngineResult<()> {
    match result {
        Ok(()) => run_picks(repo, cherries, edit),
        Err(Flow::Suspend(mut s)) => {
            s.continuations
                .push(Continuation::PickCherries { cherries, edit });
            Err(Flow::Suspend(s))
        }
        Err(other) => Err(other),
    }
}

pub fn enter(
    repo: &Repo,
    cherries: Vec<String>,
    edit: bool,
    body: impl FnOnce(&Repo) -> EngineResult<()>,
) -> EngineResult<()> {
    let result = body(repo);
    finish(repo, cherries, edit, result)
}

pub fn resume(
    repo: &Repo,
    cherries: Vec<String>,
    edit: bool,
    injected: Option<ResumeKind>,
    tail: impl FnOnce(&Repo, Option<ResumeKind>) -> EngineResult<()>,
) -> EngineResult<()> {
    let result = tail(repo, injected);
    finish(repo, cherries, edit, result)
}
