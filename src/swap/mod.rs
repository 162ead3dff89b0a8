//! The swap algorithm: reorder HEAD with its parent (or squash/fixup them
//! together), optionally riding `--keep-going`/`--up` as far as it goes.

pub mod checkpoint;
pub mod keep_going;
pub mod or_squash;
pub mod pick_cherry_with_reference;

use crate::engine::{EngineError, EngineResult, Flow, ResumeKind};
use crate::ops::{checkout_baseline, pick_cherries};
use crate::vcs::{GitError, Repo};

fn swap_failed(message: impl Into<String>) -> Flow {
    Flow::Error(EngineError::Swap(message.into()))
}

/// Swap HEAD with its unique parent, producing a tree-equivalent history
/// with the two commits in the opposite order.
pub fn swap(repo: &Repo, edit: bool, baselines: &[String]) -> EngineResult<()> {
    let one = repo.commit("HEAD")?;
    let two = match one.unique_parent() {
        Ok(Some(sha)) => repo.commit(sha)?,
        Ok(None) => return Err(swap_failed("swap failed: no parent to swap with")),
        Err(GitError::MergeFound { sha }) => {
            return Err(swap_failed(format!("swap failed: {sha} is a merge")));
        }
        Err(e) => return Err(Flow::from(anyhow::Error::from(e))),
    };
    if baselines.iter().any(|b| b == &two.sha) {
        return Err(swap_failed("hit baseline"));
    }
    let three = repo.unique_parent(&two)?;

    checkpoint::enter(repo, |repo| {
        checkout_baseline::enter(repo, three.as_ref().map(|c| c.sha.as_str()), |repo| {
            pick_cherry_with_reference::enter(repo, two.sha.clone(), one.sha.clone(), |repo| {
                pick_cherries::cherry_pick(repo, &one.sha, edit)
            })
        })
    })
}

/// `swap`, wrapped so `--squash`/`--fixup` can intercept completion.
pub fn swap_or_squash(repo: &Repo, edit: bool, baselines: &[String]) -> EngineResult<()> {
    let head = repo.commit("HEAD")?;
    or_squash::enter(repo, head.sha, |repo| swap(repo, edit, baselines))
}

/// Absorbs a bare `Stop` (raised by `OrSquash` when the user finishes with
/// `--squash`/`--fixup`, or by `KeepGoingUp` unwinding) when no
/// `--keep-going` wrapper is present to consume it itself.
pub fn single_swap(result: EngineResult<()>) -> EngineResult<()> {
    match result {
        Err(Flow::Resume(ResumeKind::Stop)) => Ok(()),
        other => other,
    }
}

/// Move HEAD to `commit`, yield, then cherry-pick everything that was above
/// it back on top, in original order.
pub fn collect_cherries(
    repo: &Repo,
    commit: Option<&str>,
    edit: bool,
    body: impl FnOnce(&Repo) -> EngineResult<()>,
) -> EngineResult<()> {
    let Some(commit) = commit else {
        return body(repo);
    };
    let sha = repo.rev_parse(commit)?;
    let mut cherries = Vec::new();
    let mut head = repo.commit("HEAD")?;
    loop {
        if head.sha == sha {
            break;
        }
        cherries.push(head.sha.clone());
        head = match head.unique_parent() {
            Ok(Some(parent)) => repo.commit(parent)?,
            Ok(None) => {
                return Err(Flow::from(EngineError::User(
                    "Error: reached a root commit without finding the target".into(),
                )));
            }
            Err(GitError::MergeFound { sha }) => {
                return Err(Flow::from(EngineError::User(format!("Error: {sha} is a merge"))));
            }
            Err(e) => return Err(Flow::from(anyhow::Error::from(e))),
        };
    }
    repo.checkout(&sha)?;
    cherries.reverse();
    pick_cherries::enter(repo, cherries, edit, body)
}

/// Used by `edit`/`squash`: walk HEAD down to `commit` (if given) and yield
/// with it checked out, then restore everything collected above it.
pub fn edit_commit(
    repo: &Repo,
    commit: Option<&str>,
    edit: bool,
    body: impl FnOnce(&Repo) -> EngineResult<()>,
) -> EngineResult<()> {
    collect_cherries(repo, commit, edit, body)
}

/// `swap --keep-going` / `swap --up`: wrap `swap_or_squash` so the target
/// keeps moving past baselines (downward) or the commits above it (upward)
/// until it can't go any further.
pub fn run_swap(
    repo: &Repo,
    edit: bool,
    keep_going: bool,
    baselines: Vec<String>,
) -> EngineResult<()> {
    if keep_going {
        keep_going::enter(repo, edit, baselines.clone(), |repo| {
            swap_or_squash(repo, edit, &baselines)
        })
    } else {
        single_swap(swap_or_squash(repo, edit, &baselines))
    }
}

/// `swap --up TARGET`: collect the commits between HEAD and `target`, then
/// walk `target` up past them one at a time.
pub fn run_swap_up(repo: &Repo, edit: bool, target: &str) -> EngineResult<()> {
    let sha = repo.rev_parse(target)?;
    let mut cherries = Vec::new();
    let mut head = repo.commit("HEAD")?;
    loop {
        if head.sha == sha {
            break;
        }
        cherries.push(head.sha.clone());
        head = match head.unique_parent() {
            Ok(Some(parent)) => repo.commit(parent)?,
            Ok(None) => {
                return Err(Flow::from(EngineError::User(
                    "Error: reached a root commit without finding the target".into(),
                )));
            }
            Err(GitError::MergeFound { sha }) => {
                return Err(Flow::from(EngineError::User(format!("Error: {sha} is a merge"))));
            }
            Err(e) => return Err(Flow::from(anyhow::Error::from(e))),
        };
    }
    cherries.reverse();
    single_swap(keep_going::enter_up(repo, edit, &sha, cherries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::process::Command;

    fn git(dir: &std::path::Path, args: &[&str]) {
        let status = Command::new("git").args(args).current_dir(dir).status().unwrap();
        assert!(status.success(), "git {args:?} failed");
    }

    fn write_commit(dir: &std::path::Path, name: &str, content: &str, message: &str) {
        std::fs::write(dir.join(name), content).unwrap();
        git(dir, &["add", "."]);
        git(dir, &["commit", "-q", "-m", message]);
    }

    fn log(dir: &std::path::Path) -> Vec<String> {
        let out = Command::new("git")
            .args(["log", "--reverse", "--pretty=format:%s"])
            .current_dir(dir)
            .output()
            .unwrap();
        String::from_utf8_lossy(&out.stdout).lines().map(str::to_string).collect()
    }

    /// S4: `swap --keep-going` pushes the target down past ordinary
    /// commits but stops as soon as it would cross a configured baseline.
    #[test]
    fn keep_going_stops_at_baseline() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path();
        git(dir, &["init", "-q"]);
        git(dir, &["config", "user.name", "Test"]);
        git(dir, &["config", "user.email", "test@example.com"]);

        write_commit(dir, "a", "a", "a");
        git(dir, &["branch", "baseline-mark"]);
        let baseline_sha = String::from_utf8_lossy(
            &Command::new("git").args(["rev-parse", "baseline-mark"]).current_dir(dir).output().unwrap().stdout,
        )
        .trim()
        .to_string();
        write_commit(dir, "c", "c", "c");
        write_commit(dir, "d", "d", "d");
        write_commit(dir, "e", "e", "e");
        write_commit(dir, "x", "x", "X");

        let repo = Repo::discover_at(dir).unwrap();
        let sha = repo.rev_parse("HEAD").unwrap();

        run_swap(&repo, false, true, vec![baseline_sha.clone()]).expect("keep-going should succeed");

        assert!(repo.run_check(&["diff", "--quiet", &sha, "HEAD"]).unwrap());
        assert_eq!(log(dir), vec!["a", "X", "c", "d", "e"]);
    }
}
