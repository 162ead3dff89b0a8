//! Shared scaffolding for the CLI integration tests: a throwaway git repo
//! wired up the same way the original test suite's `Directory`/`Git`
//! fixtures were, minus the Python.

use std::path::{Path, PathBuf};
use std::process::Command;

use assert_cmd::cargo::cargo_bin;
use tempfile::TempDir;

pub struct TestRepo {
    _dir: TempDir,
    path: PathBuf,
}

impl TestRepo {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create tempdir");
        let path = dir.path().to_path_buf();
        let repo = Self { _dir: dir, path };
        repo.git(&["init", "-q"]);
        repo.git(&["config", "user.name", "Test User"]);
        repo.git(&["config", "user.email", "test@example.com"]);
        repo.git(&["commit", "-q", "--allow-empty", "-m", "0"]);
        repo
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run a git command, asserting success.
    pub fn git(&self, args: &[&str]) -> String {
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.path)
            .output()
            .expect("spawn git");
        assert!(
            output.status.success(),
            "git {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }

    /// Run a git command without asserting the outcome.
    pub fn git_unchecked(&self, args: &[&str]) -> bool {
        Command::new("git")
            .args(args)
            .current_dir(&self.path)
            .status()
            .expect("spawn git")
            .success()
    }

    pub fn write(&self, filename: &str, content: &str) {
        std::fs::write(self.path.join(filename), format!("{}\n", content.trim())).expect("write file");
    }

    pub fn commit(&self, filename: &str, content: &str, message: &str) {
        self.write(filename, content);
        self.git(&["add", "."]);
        self.git(&["commit", "-q", "-m", message]);
    }

    pub fn rev_parse(&self, rev: &str) -> String {
        self.git(&["rev-parse", rev])
    }

    /// Subject lines of the whole history, oldest first.
    pub fn log(&self) -> Vec<String> {
        self.git(&["log", "--reverse", "--pretty=format:%s"])
            .lines()
            .map(str::to_string)
            .collect()
    }

    pub fn branches(&self) -> Vec<String> {
        self.git(&["for-each-ref", "--format=%(refname:short)", "refs/heads/"])
            .lines()
            .map(str::to_string)
            .collect()
    }

    pub fn diff_empty(&self, a: &str, b: &str) -> bool {
        self.git_unchecked(&["diff", "--quiet", a, b])
    }

    /// Run one of this crate's own binaries (`swap`, `squash`, `edit`,
    /// `queue`) inside the repo, asserting nothing about the outcome.
    pub fn bin(&self, name: &str) -> Command {
        let mut cmd = Command::new(cargo_bin(name));
        cmd.current_dir(&self.path);
        cmd
    }
}
