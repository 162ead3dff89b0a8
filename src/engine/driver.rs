//! The top-level and resume drivers shared by all four tools: refuse to
//! start over an existing operation, run the tool body, and turn whatever
//! signal comes back into an exit code.

use super::continuation::Continuation;
use super::error::EngineError;
use super::signal::{EngineResult, Flow, ResumeKind};
use super::state_file::{self, SuspendedState};
use crate::vcs::Repo;

pub const EXIT_OK: i32 = 0;
pub const EXIT_USER_ERROR: i32 = 1;
pub const EXIT_SUSPEND: i32 = 2;

pub struct Driver<'a> {
    pub repo: &'a Repo,
    pub tool: &'static str,
    pub suspend_message: &'static str,
}

impl<'a> Driver<'a> {
    pub fn new(repo: &'a Repo, tool: &'static str) -> Self {
        Self {
            repo,
            tool,
            suspend_message: "Suspended!",
        }
    }

    pub fn with_suspend_message(mut self, message: &'static str) -> Self {
        self.suspend_message = message;
        self
    }

    /// Run a fresh top-level operation. Refuses if the worktree is dirty or
    /// an operation is already in progress.
    pub fn run_main(&self, body: impl FnOnce(&Repo) -> EngineResult<()>) -> i32 {
        if let Err(code) = self.refuse_if_busy() {
            return code;
        }
        match self.repo.is_clean() {
            Ok(true) => {}
            Ok(false) => {
                eprintln!("Error: repo not clean");
                return EXIT_USER_ERROR;
            }
            Err(e) => {
                eprintln!("{e}");
                return EXIT_USER_ERROR;
            }
        }
        self.finish(body(self.repo))
    }

    /// Resume a suspended operation, optionally injecting a user
    /// instruction (`--abort`/`--stop`/`--squash`/`--fixup`).
    pub fn run_resume(&self, injected: Option<ResumeKind>) -> i32 {
        let path = self.repo.continuation_path();
        if !state_file::exists(&path) {
            eprintln!("Error: no {} operation is in progress", self.tool);
            return EXIT_USER_ERROR;
        }
        let state = match state_file::load(&path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("{e}");
                return EXIT_USER_ERROR;
            }
        };
        if state.tool != self.tool {
            eprintln!("A {} operation is currently in progress", state.tool);
            return EXIT_USER_ERROR;
        }
        if let Err(e) = state_file::delete(&path) {
            eprintln!("{e}");
            return EXIT_USER_ERROR;
        }

        let original_status = state.status.clone();
        let result = resume_stack(self.repo, state.continuations, injected);
        self.finish(self.preserve_status(result, original_status))
    }

    /// Design note (c): a re-suspend during resume keeps the original
    /// status unless the raiser supplied a new one.
    fn preserve_status(&self, result: EngineResult<()>, original: Option<String>) -> EngineResult<()> {
        match result {
            Err(Flow::Suspend(mut s)) if s.status.is_none() => {
                s.status = original;
                Err(Flow::Suspend(s))
            }
            other => other,
        }
    }

    pub fn status(&self) -> i32 {
        let path = self.repo.continuation_path();
        if !state_file::exists(&path) {
            println!("no operation in progress");
            return EXIT_OK;
        }
        match state_file::load(&path) {
            Ok(state) if state.tool == self.tool => {
                println!("{}", state.status.as_deref().unwrap_or("unknown"));
                EXIT_OK
            }
            Ok(state) => {
                eprintln!("{} operation is in progress, not {}", state.tool, self.tool);
                EXIT_USER_ERROR
            }
            Err(e) => {
                eprintln!("{e}");
                EXIT_USER_ERROR
            }
        }
    }

    fn refuse_if_busy(&self) -> Result<(), i32> {
        let path = self.repo.continuation_path();
        if state_file::exists(&path) {
            let tool = state_file::load(&path)
                .map(|s| s.tool)
                .unwrap_or_else(|_| "a".to_string());
            eprintln!("{tool} operation is already in progress.");
            return Err(EXIT_USER_ERROR);
        }
        Ok(())
    }

    fn finish(&self, result: EngineResult<()>) -> i32 {
        match result {
            Ok(()) => EXIT_OK,
            Err(Flow::Suspend(s)) => self.suspend(s),
            Err(Flow::Resume(ResumeKind::Abort)) => {
                println!("Cancelled.  Previous state restored.");
                EXIT_OK
            }
            Err(Flow::Resume(_)) => {
                panic!("internal error: uncaught Resume signal reached the driver")
            }
            Err(Flow::Error(EngineError::User(msg))) => {
                eprintln!("{msg}");
                EXIT_USER_ERROR
            }
            Err(Flow::Error(EngineError::Swap(msg))) => {
                eprintln!("{msg}");
                EXIT_USER_ERROR
            }
            Err(Flow::Error(EngineError::Vcs(e))) => {
                eprintln!("{e}");
                EXIT_USER_ERROR
            }
        }
    }

    fn suspend(&self, s: super::signal::Suspend) -> i32 {
        if let Some(status) = &s.status {
            println!("{status}");
        }
        let mut continuations = s.continuations;
        continuations.reverse();
        let state = SuspendedState {
            tool: self.tool.to_string(),
            status: s.status,
            continuations,
        };
        if let Err(e) = state_file::write(&self.repo.continuation_path(), &state) {
            eprintln!("{e}");
            return EXIT_USER_ERROR;
        }
        println!("{}", self.suspend_message);
        EXIT_SUSPEND
    }
}

/// Reconstruct the nested continuation stack, outermost first, recursing
/// into the remainder before each continuation's own resume logic runs.
fn resume_stack(repo: &Repo, mut stack: Vec<Continuation>, injected: Option<ResumeKind>) -> EngineResult<()> {
    if stack.is_empty() {
        return match injected {
            Some(r) => Err(Flow::Resume(r)),
            None => Ok(()),
        };
    }
    let head = stack.remove(0);
    let rest = stack;
    head.resume(repo, injected, move |repo, injected| resume_stack(repo, rest, injected))
}
