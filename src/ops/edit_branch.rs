//! Detach from the current branch so it can be rewritten without polluting
//! the reflog with intermediate steps, then reattach on success.

use crate::engine::{Continuation, EngineResult, Flow, ResumeKind};
use crate::vcs::Repo;

/// If `head` names a branch ref, return its short name.
fn branch_name(head: &str) -> Option<&str> {
    head.strip_prefix("refs/heads/").filter(|b| !b.is_empty())
}

fn finish(repo: &Repo, head: String, message: String, result: EngineResult<()>) -> EngineResult<()> {
    match result {
        Ok(()) => {
            if let Some(branch) = branch_name(&head) {
                repo.run(&["update-ref", "-m", &message, &head, "HEAD"])?;
                repo.checkout(branch)?;
            }
            Ok(())
        }
        Err(Flow::Suspend(mut s)) => {
            s.continuations.push(Continuation::EditBranch { head, message });
            Err(Flow::Suspend(s))
        }
        Err(other) => {
            eprintln!("# Failed.  Resetting to original HEAD");
            repo.force_checkout(branch_name(&head).unwrap_or(&head))?;
            Err(other)
        }
    }
}

/// Enter a fresh `EditBranch` scope: capture and detach HEAD, run `body`
/// with the captured head, then reattach on success or restore on failure.
pub fn enter(
    repo: &Repo,
    message: impl Into<String>,
    body: impl FnOnce(&Repo, &str) -> EngineResult<()>,
) -> EngineResult<()> {
    let message = message.into();
    let head = repo.head()?;
    repo.detach()?;
    let result = body(repo, &head);
    finish(repo, head, message, result)
}

pub fn resume(
    repo: &Repo,
    head: String,
    message: String,
    injected: Option<ResumeKind>,
    tail: impl FnOnce(&Repo, Option<ResumeKind>) -> EngineResult<()>,
) -> EngineResult<()> {
    let result = tail(repo, injected);
    finish(repo, head, message, result)
}
