//! A narrow façade over the `git` binary.
//!
//! Every operation here is a subprocess invocation; this module owns CWD,
//! stdout/stderr capture, and error-path normalization into [`GitError`].
//! It knows nothing about continuations, swap, or queue semantics.

mod cmd;
mod commit;
pub mod error;

pub use cmd::Cmd;
pub use commit::{AuthorDate, Baseline, Commit};
pub use error::GitError;

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};

/// A git repository, rooted at its toplevel working directory.
#[derive(Debug, Clone)]
pub struct Repo {
    root: PathBuf,
    git_dir: PathBuf,
}

impl Repo {
    /// Discover the repository containing the current directory.
    pub fn discover() -> anyhow::Result<Self> {
        Self::discover_at(Path::new("."))
    }

    pub fn discover_at(dir: &Path) -> anyhow::Result<Self> {
        let toplevel = Cmd::new("git")
            .args(["rev-parse", "--show-toplevel"])
            .current_dir(dir)
            .run()
            .context("failed to execute: git rev-parse --show-toplevel")?;
        if !toplevel.status.success() {
            bail!(GitError::NotARepository);
        }
        let root = PathBuf::from(String::from_utf8_lossy(&toplevel.stdout).trim());

        let git_dir_out = Cmd::new("git")
            .args(["rev-parse", "--git-dir"])
            .current_dir(&root)
            .run()
            .context("failed to execute: git rev-parse --git-dir")?;
        if !git_dir_out.status.success() {
            bail!(GitError::NotARepository);
        }
        let raw_git_dir = PathBuf::from(String::from_utf8_lossy(&git_dir_out.stdout).trim());
        let git_dir = if raw_git_dir.is_absolute() {
            raw_git_dir
        } else {
            root.join(raw_git_dir)
        };

        Ok(Self { root, git_dir })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn git_dir(&self) -> &Path {
        &self.git_dir
    }

    /// Path to the singleton suspended-state file.
    pub fn continuation_path(&self) -> PathBuf {
        self.git_dir.join("continuation.json")
    }

    pub fn queuefile_path(&self) -> PathBuf {
        self.root.join(".git-queue")
    }

    fn cmd(&self, args: &[&str]) -> Cmd {
        Cmd::new("git").args(args.iter().copied()).current_dir(&self.root)
    }

    /// Run a git command, returning trimmed stdout on success or
    /// `GitError::VcsFailed` on non-zero exit.
    pub fn run(&self, args: &[&str]) -> anyhow::Result<String> {
        let output = self
            .cmd(args)
            .run()
            .with_context(|| format!("failed to execute: git {}", args.join(" ")))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            bail!(GitError::VcsFailed { stderr });
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim_end().to_string())
    }

    /// Like [`Self::run`], with extra environment variables set on the
    /// child process (used to pin `GIT_AUTHOR_*` when squashing).
    pub fn run_with_env(&self, args: &[&str], envs: &[(&str, &str)]) -> anyhow::Result<String> {
        let mut cmd = self.cmd(args);
        for (key, value) in envs {
            cmd = cmd.env(*key, *value);
        }
        let output = cmd
            .run()
            .with_context(|| format!("failed to execute: git {}", args.join(" ")))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            bail!(GitError::VcsFailed { stderr });
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim_end().to_string())
    }

    /// Run a git command for its exit status alone (no error on failure).
    pub fn run_check(&self, args: &[&str]) -> anyhow::Result<bool> {
        let output = self
            .cmd(args)
            .run()
            .with_context(|| format!("failed to execute: git {}", args.join(" ")))?;
        Ok(output.status.success())
    }

    pub fn rev_parse(&self, rev: &str) -> anyhow::Result<String> {
        self.run(&["rev-parse", rev])
    }

    /// Resolve a ref to its symbolic full name (e.g. `refs/heads/main`), or
    /// `None` if the ref is not a symbolic ref (e.g. HEAD is detached).
    pub fn symbolic_full_name(&self, rev: &str) -> anyhow::Result<Option<String>> {
        let output = self
            .cmd(&["rev-parse", "--symbolic-full-name", rev])
            .run()?;
        if !output.status.success() {
            return Ok(None);
        }
        let name = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok(if name.is_empty() { None } else { Some(name) })
    }

    pub fn commit(&self, rev: &str) -> anyhow::Result<Commit> {
        let raw = self.run(&["log", "-n1", "--pretty=raw", rev])?;
        Commit::parse_raw(&raw).map_err(Into::into)
    }

    /// Commits reachable from `to` but not from any of `exclude`, in the
    /// given order.
    pub fn commits(&self, exclude: &[&str], to: &str, reverse: bool) -> anyhow::Result<Vec<Commit>> {
        let mut args = vec!["log", "--pretty=raw"];
        if reverse {
            args.push("--reverse");
        }
        let excludes: Vec<String> = exclude.iter().map(|e| format!("^{e}")).collect();
        args.extend(excludes.iter().map(String::as_str));
        args.push(to);
        let output = self.run(&args)?;
        if output.trim().is_empty() {
            return Ok(Vec::new());
        }
        output
            .split("\ncommit ")
            .enumerate()
            .map(|(i, chunk)| {
                let raw = if i == 0 {
                    chunk.to_string()
                } else {
                    format!("commit {chunk}")
                };
                Commit::parse_raw(&raw).map_err(Into::into)
            })
            .collect()
    }

    /// The unique single parent of `commit`, or `None` if it is a root.
    pub fn unique_parent(&self, commit: &Commit) -> anyhow::Result<Option<Commit>> {
        match commit.unique_parent()? {
            None => Ok(None),
            Some(sha) => Ok(Some(self.commit(sha)?)),
        }
    }

    /// Like [`Self::unique_parent`], but treats a root commit the same as
    /// having no parent (used where callers already handle `None`).
    pub fn unique_parent_or_root(&self, commit: &Commit) -> anyhow::Result<Option<Commit>> {
        self.unique_parent(commit)
    }

    pub fn checkout(&self, rev: &str) -> anyhow::Result<()> {
        self.run(&["checkout", "-q", rev])?;
        Ok(())
    }

    pub fn force_checkout(&self, rev: &str) -> anyhow::Result<()> {
        self.run(&["checkout", "-q", "-f", rev])?;
        Ok(())
    }

    pub fn detach(&self) -> anyhow::Result<()> {
        let sha = self.rev_parse("HEAD")?;
        self.checkout(&sha)
    }

    /// Current symbolic HEAD ref, or the bare sha if detached.
    pub fn head(&self) -> anyhow::Result<String> {
        if let Some(name) = self.symbolic_full_name("HEAD")? {
            Ok(name)
        } else {
            self.rev_parse("HEAD")
        }
    }

    pub fn branches(&self) -> anyhow::Result<Vec<String>> {
        let output = self.run(&["for-each-ref", "--format=%(refname:short)", "refs/heads/"])?;
        Ok(output.lines().map(str::to_string).filter(|l| !l.is_empty()).collect())
    }

    pub fn ref_exists(&self, rev: &str) -> anyhow::Result<bool> {
        self.run_check(&["rev-parse", "--verify", "--quiet", rev])
    }

    pub fn branch_exists(&self, branch: &str) -> anyhow::Result<bool> {
        self.ref_exists(&format!("refs/heads/{branch}"))
    }

    /// Whether HEAD points at a branch ref that does not yet exist (the
    /// next commit on it will be a root).
    pub fn on_orphan_branch(&self) -> anyhow::Result<bool> {
        match self.symbolic_full_name("HEAD")? {
            Some(_) => Ok(!self.ref_exists("HEAD")?),
            None => Ok(false),
        }
    }

    pub fn find_remote(&self, url: &str) -> anyhow::Result<Option<String>> {
        let output = self.run(&["remote"])?;
        for remote in output.lines() {
            let remote_url = self.run(&["remote", "get-url", remote])?;
            if remote_url.trim() == url {
                return Ok(Some(remote.to_string()));
            }
        }
        Ok(None)
    }

    pub fn fetch(&self, remote: &str, refspec: Option<&str>) -> anyhow::Result<()> {
        match refspec {
            Some(r) => self.run(&["fetch", remote, r])?,
            None => self.run(&["fetch", remote])?,
        };
        Ok(())
    }

    /// The single baseline config of a branch, i.e. `branch.<name>.merge`
    /// rewritten against `branch.<name>.remote`, as a sha. Returns `None`
    /// when the branch has no upstream configured.
    pub fn baselines(&self, branch: Option<&str>) -> anyhow::Result<Vec<String>> {
        let Some(branch) = branch else {
            return Ok(Vec::new());
        };
        let merge = self.cmd(&["config", &format!("branch.{branch}.merge")]).run()?;
        if !merge.status.success() {
            return Ok(Vec::new());
        }
        let merge_ref = String::from_utf8_lossy(&merge.stdout).trim().to_string();
        let remote = self.cmd(&["config", &format!("branch.{branch}.remote")]).run()?;
        let remote_name = if remote.status.success() {
            String::from_utf8_lossy(&remote.stdout).trim().to_string()
        } else {
            ".".to_string()
        };
        let upstream = if remote_name == "." {
            merge_ref
        } else {
            format!("refs/remotes/{remote_name}/{}", merge_ref.trim_start_matches("refs/heads/"))
        };
        if !self.ref_exists(&upstream)? {
            return Ok(Vec::new());
        }
        Ok(vec![self.rev_parse(&upstream)?])
    }

    pub fn ls_files(&self) -> anyhow::Result<Vec<String>> {
        let output = self.run(&["ls-files"])?;
        Ok(output.lines().map(str::to_string).collect())
    }

    /// Delete all tracked files and clear the index, used when fabricating
    /// an empty orphan branch.
    pub fn delete_index_and_files(&self) -> anyhow::Result<()> {
        self.run(&["rm", "-rqf", "."]).ok();
        for entry in std::fs::read_dir(&self.root)? {
            let entry = entry?;
            if entry.file_name() == ".git" {
                continue;
            }
            let path = entry.path();
            if path.is_dir() {
                std::fs::remove_dir_all(&path).ok();
            } else {
                std::fs::remove_file(&path).ok();
            }
        }
        Ok(())
    }

    /// Worktree and index cleanliness. Orphan branches have no HEAD to diff
    /// against, so only the worktree is checked there.
    pub fn is_clean(&self) -> anyhow::Result<bool> {
        if self.on_orphan_branch()? {
            return Ok(self.ls_files()?.is_empty());
        }
        let staged = self.run_check(&["diff", "--cached", "--quiet"])?;
        let unstaged = self.run_check(&["diff", "--quiet"])?;
        Ok(staged && unstaged)
    }

    pub fn cherry_pick_in_progress(&self) -> bool {
        self.git_dir.join("CHERRY_PICK_HEAD").exists()
    }

    pub fn has_unmerged_files(&self) -> anyhow::Result<bool> {
        Ok(!self.unmerged_files()?.is_empty())
    }

    pub fn unmerged_files(&self) -> anyhow::Result<Vec<String>> {
        let output = self.run(&["diff", "--name-only", "--diff-filter=U"])?;
        Ok(output.lines().map(str::to_string).collect())
    }

    /// Abort an in-progress cherry-pick, including the orphan-branch
    /// special case where git itself refuses (`CHERRY_PICK_HEAD` must be
    /// removed and the worktree cleared by hand).
    pub fn cherry_pick_abort(&self) -> anyhow::Result<()> {
        if self.cherry_pick_in_progress() && self.on_orphan_branch()? {
            std::fs::remove_file(self.git_dir.join("CHERRY_PICK_HEAD")).ok();
            self.delete_index_and_files()?;
            Ok(())
        } else {
            self.run(&["cherry-pick", "--abort"]).map(|_| ())
        }
    }
}
