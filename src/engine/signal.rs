//! The two signal families threaded through every scope: `Suspend`, which
//! freezes a stack of continuations to disk, and `Resume`, the four-valued
//! family of user instructions injected back into that stack.

use super::continuation::Continuation;
use super::error::EngineError;

/// A user-injected instruction, delivered into the rehydrated continuation
/// stack on `--abort` / `--stop` / `--squash` / `--fixup`. Must be consumed
/// by some scope on the way up; an unconsumed `Resume` reaching the driver
/// is an internal error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeKind {
    Abort,
    Stop,
    Squash,
    Fixup,
}

/// Carries the stack of continuations accumulated while a `Suspend`
/// propagates outward. Scopes append themselves innermost-first; the
/// suspend writer reverses the list before serializing.
#[derive(Debug, Default)]
pub struct Suspend {
    pub status: Option<String>,
    pub continuations: Vec<Continuation>,
}

impl Suspend {
    pub fn new(status: Option<String>) -> Self {
        Self {
            status,
            continuations: Vec::new(),
        }
    }
}

/// The three ways a scope body can fail to return normally.
pub enum Flow {
    Suspend(Suspend),
    Resume(ResumeKind),
    Error(EngineError),
}

pub type EngineResult<T> = Result<T, Flow>;

impl From<EngineError> for Flow {
    fn from(e: EngineError) -> Self {
        Flow::Error(e)
    }
}

impl From<anyhow::Error> for Flow {
    fn from(e: anyhow::Error) -> Self {
        Flow::Error(EngineError::Vcs(e))
    }
}
