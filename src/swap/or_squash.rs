//! Intercepts the `--squash`/`--fixup` resume instructions and turns a
//! completed swap into a squash or fixup instead. `--stop` and `--abort`
//! pass straight through unhandled here; `--stop` is absorbed by
//! [`super::keep_going`] or `SingleSwap`.

use crate::engine::{Continuation, EngineResult, Flow, ResumeKind};
use crate::ops::checkout_baseline;
use crate::vcs::Repo;

fn fixup(repo: &Repo, head: &str) -> EngineResult<()> {
    let a = repo.commit(head)?;
    let b = repo.unique_parent(&a)?.ok_or_else(|| anyhow::anyhow!("{head} has no parent"))?;
    let c = repo.unique_parent_or_root(&b)?;
    checkout_baseline::enter(repo, c.as_ref().map(|c| c.sha.as_str()), |repo| {
        repo.run(&["read-tree", &a.sha])?;
        repo.run(&["commit", "--allow-empty", "--reuse-message", &b.sha])?;
        repo.run(&["reset", "--hard", "HEAD"])?;
        Ok(())
    })
}

fn squash(repo: &Repo, head: &str) -> EngineResult<()> {
    let a = repo.commit(head)?;
    let b = repo.unique_parent(&a)?.ok_or_else(|| anyhow::anyhow!("{head} has no parent"))?;
    let c = repo.unique_parent_or_root(&b)?;
    checkout_baseline::enter(repo, c.as_ref().map(|c| c.sha.as_str()), |repo| {
        repo.run(&["read-tree", &a.sha])?;
        let message_path = repo.git_dir().join("COMMIT_EDITMSG");
        std::fs::write(&message_path, format!("{}\n\n{}", b.message, a.message))
            .map_err(|e| anyhow::Error::from(e))?;
        repo.run_with_env(
            &[
                "commit",
                "--allow-empty",
                "--edit",
                "-F",
                message_path.to_str().unwrap_or_default(),
            ],
            &[
                ("GIT_AUTHOR_NAME", b.author.name.as_str()),
                ("GIT_AUTHOR_EMAIL", b.author.email.as_str()),
                ("GIT_AUTHOR_DATE", b.author.date.as_str()),
            ],
        )?;
        repo.run(&["reset", "--hard", "HEAD"])?;
        Ok(())
    })
}

fn finish(repo: &Repo, head: String, result: EngineResult<()>) -> EngineResult<()> {
    match result {
        Ok(()) => Ok(()),
        Err(Flow::Suspend(mut s)) => {
            s.continuations.push(Continuation::OrSquash { head });
            Err(Flow::Suspend(s))
        }
        Err(Flow::Resume(ResumeKind::Fixup)) => {
            fixup(repo, &head)?;
            Err(Flow::Resume(ResumeKind::Stop))
        }
        Err(Flow::Resume(ResumeKind::Squash)) => {
            squash(repo, &head)?;
            Err(Flow::Resume(ResumeKind::Stop))
        }
        Err(other) => Err(other),
    }
}

pub fn enter(
    repo: &Repo,
    head: String,
    body: impl FnOnce(&Repo) -> EngineResult<()>,
) -> EngineResult<()> {
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
