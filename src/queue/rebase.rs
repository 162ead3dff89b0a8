//! `queue init` / `queue rebase`: walks a patch stack's non-bookkeeping
//! commits and replays them on top of freshly refreshed baselines.

use anyhow::{Context, bail};

use crate::engine::EngineResult;
use crate::ops::{edit_branch, pick_cherries};
use crate::vcs::{Commit, Repo};

use super::file::{Baseline, QueueFile, from_this_tool, message};

/// All four tools share one suite-wide trailer name, matching the
/// original's `from_this_tool` check (it looks for `Tool: gitq`
/// regardless of which binary created the commit).
pub const TOOL: &str = "gitq";

pub struct Queue<'a> {
    repo: &'a Repo,
    pub file: QueueFile,
}

impl<'a> Queue<'a> {
    pub fn open(repo: &'a Repo) -> anyhow::Result<Self> {
        let path = repo.queuefile_path();
        if !path.exists() {
            bail!("This branch is not a queue.");
        }
        let contents = std::fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
        Ok(Self {
            repo,
            file: QueueFile::load(&contents)?,
        })
    }

    fn save_queuefile(&self) -> anyhow::Result<()> {
        let path = self.repo.queuefile_path();
        std::fs::write(&path, self.file.dumps()?)?;
        self.repo.run(&["add", path.to_str().unwrap_or(".git-queue")])?;
        self.repo.run(&["commit", "--amend", "-C", "HEAD"])?;
        Ok(())
    }

    /// Fold all configured baselines down into a single merge commit (or a
    /// bare checkout if there is only one), then commit the queuefile on
    /// top of it.
    pub fn merge_baselines(&self) -> anyhow::Result<Commit> {
        let (first, rest) = self
            .file
            .baselines
            .split_first()
            .context("queue has no baselines")?;

        if rest.is_empty() {
            self.repo.checkout(&first.sha)?;
            self.repo
                .run(&["commit", "--allow-empty", "-m", &message("baseline", self.file.title.as_deref(), TOOL)])?;
            self.save_queuefile()?;
            return self.repo.commit("HEAD");
        }

        self.repo.checkout(&first.sha)?;
        let refs: Vec<&str> = rest.iter().map(|b| b.sha.as_str()).collect();
        let mut args = vec!["merge"];
        args.extend(refs.iter().copied());
        args.push("-m");
        let merge_message = message("merged baselines", self.file.title.as_deref(), TOOL);
        args.push(&merge_message);
        match self.repo.run(&args) {
            Ok(_) => {
                self.save_queuefile()?;
                self.repo.commit("HEAD")
            }
            Err(_) => {
                self.repo.run(&["merge", "--abort"]).ok();
                for r in &refs {
                    self.repo.run(&["merge", r])?;
                }
                self.save_queuefile()?;
                self.repo.commit("HEAD")
            }
        }
    }

    pub fn init(&self) -> anyhow::Result<()> {
        let path = self.repo.queuefile_path();
        self.repo.run(&["add", path.to_str().unwrap_or(".git-queue")])?;
        self.repo
            .run(&["commit", "-m", &message("initialized queue", self.file.title.as_deref(), TOOL)])?;
        Ok(())
    }

    /// The patches above the baselines that still need replaying: not the
    /// tool's own bookkeeping commits, not the queuefile-only commit, and
    /// (for now) not unresolved merges.
    pub fn find_patches(&self) -> anyhow::Result<Vec<Commit>> {
        if self.repo.on_orphan_branch()? {
            return Ok(Vec::new());
        }
        let excludes: Vec<&str> = self.file.baselines.iter().map(|b| b.sha.as_str()).collect();
        let commits = self.repo.commits(&excludes, "HEAD", true)?;
        let queuefile_name = self
            .repo
            .queuefile_path()
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(".git-queue")
            .to_string();

        let mut patches = Vec::new();
        for commit in commits {
            if from_this_tool(&commit.message, TOOL) {
                continue;
            }
            if commit.is_merge() {
                if is_conflicted(&commit) {
                    continue;
                }
                bail!("rebasing merges is not implemented yet");
            }
            let changed = self.repo.run(&["show", "--name-only", "--pretty=", &commit.sha])?;
            if changed.trim() == queuefile_name {
                continue;
            }
            patches.push(commit);
        }
        Ok(patches)
    }

    pub fn rebase(&mut self) -> EngineResult<()> {
        let patches = self.find_patches()?;
        self.file.baselines = self
            .file
            .baselines
            .iter()
            .map(|b| refresh_baseline(self.repo, b))
            .collect::<anyhow::Result<Vec<_>>>()?;

        let cherries: Vec<String> = patches.iter().map(|c| c.sha.clone()).collect();
        edit_branch::enter(self.repo, "git-queue rebase", |repo, _head| {
            pick_cherries::enter(repo, cherries, true, |repo| {
                self.merge_baselines().map(|_| ()).map_err(Into::into)
            })
        })
    }
}

/// A merge commit is treated as already resolved (rather than needing a
/// rebase strategy we don't implement) when git's default merge commit
/// template's conflict-marker section was never populated.
fn is_conflicted(commit: &Commit) -> bool {
    commit.message.contains("\nConflicts:\n")
}

/// Build a `Baseline` from a user-provided ref, recording enough to refresh
/// it later: the resolved sha, its symbolic ref (if any), and the remote it
/// was fetched from (if it's a remote-tracking ref).
pub fn parse_baseline(repo: &Repo, reference: &str) -> anyhow::Result<Baseline> {
    let sha = repo.rev_parse(reference)?;
    let full_name = repo.symbolic_full_name(reference)?;

    if let Some(full_name) = &full_name {
        if let Some(rest) = full_name.strip_prefix("refs/remotes/") {
            if let Some((remote, branch)) = rest.split_once('/') {
                let url = repo.run(&["remote", "get-url", remote])?;
                return Ok(Baseline {
                    sha,
                    ref_name: Some(format!("refs/heads/{branch}")),
                    remote: Some(url.trim().to_string()),
                });
            }
        }
    }

    if reference == sha || reference == "HEAD" {
        Ok(Baseline { sha, ref_name: None, remote: None })
    } else {
        Ok(Baseline { sha, ref_name: full_name, remote: None })
    }
}

/// Re-resolve a baseline against its remote before rebasing onto it, so a
/// queue tracks a moving upstream rather than a pinned sha.
pub fn refresh_baseline(repo: &Repo, baseline: &Baseline) -> anyhow::Result<Baseline> {
    let Some(ref_name) = &baseline.ref_name else {
        return Ok(baseline.clone());
    };
    match &baseline.remote {
        Some(remote_url) => {
            if let Some(branch) = ref_name.strip_prefix("refs/heads/") {
                if let Some(remote) = repo.find_remote(remote_url)? {
                    repo.fetch(&remote, None)?;
                    let fetched = format!("refs/remotes/{remote}/{branch}");
                    let sha = repo.commit(&fetched)?.sha;
                    return Ok(Baseline {
                        sha,
                        ref_name: Some(ref_name.clone()),
                        remote: Some(remote_url.clone()),
                    });
                }
            }
            repo.fetch(remote_url, Some(ref_name))?;
            let sha = repo.commit("FETCH_HEAD")?.sha;
            Ok(Baseline {
                sha,
                ref_name: Some(ref_name.clone()),
                remote: Some(remote_url.clone()),
            })
        }
        None => {
            let sha = repo.commit(ref_name)?.sha;
            Ok(Baseline { sha, ref_name: Some(ref_name.clone()), remote: None })
        }
    }
}
