//! The closed registry of continuation kinds.
//!
//! Each variant's JSON-serializable fields are exactly its constructor
//! parameters, per the data model's round-trip invariant. Behavior (the
//! on_success/on_failure tails) lives with the owning op or swap module;
//! this enum only carries state across the suspend/resume boundary and
//! dispatches into that behavior on resume.

use serde::{Deserialize, Serialize};

use super::signal::{EngineResult, ResumeKind};
use crate::vcs::Repo;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Continuation {
    EditBranch {
        head: String,
        message: String,
    },
    PickCherries {
        cherries: Vec<String>,
        edit: bool,
    },
    CherryPickContinue {
        #[serde(rename = "ref")]
        reference: String,
    },
    DeleteTempBranch {
        branch: String,
        previous_head: String,
    },
    SwapCheckpoint {
        head: String,
    },
    PickCherryWithReference {
        cherry: String,
        reference: String,
    },
    OrSquash {
        head: String,
    },
    KeepGoing {
        edit: bool,
        baselines: Vec<String>,
    },
    KeepGoingUp {
        edit: bool,
        cherries: Vec<String>,
    },
}

impl Continuation {
    /// Resume this single continuation, nesting `tail` as the reconstructed
    /// remainder of the stack (outermost continuation calls this first,
    /// with `tail` recursing into the next one).
    pub fn resume(
        self,
        repo: &Repo,
        injected: Option<ResumeKind>,
        tail: impl FnOnce(&Repo, Option<ResumeKind>) -> EngineResult<()>,
    ) -> EngineResult<()> {
        match self {
            Continuation::EditBranch { head, message } => {
                crate::ops::edit_branch::resume(repo, head, message, injected, tail)
            }
            Continuation::PickCherries { cherries, edit } => {
                crate::ops::pick_cherries::resume(repo, cherries, edit, injected, tail)
            }
            Continuation::CherryPickContinue { reference } => {
                crate::ops::cherry_pick_continue::resume(repo, reference, injected, tail)
            }
            Continuation::DeleteTempBranch {
                branch,
                previous_head,
            } => crate::ops::delete_temp_branch::resume(repo, branch, previous_head, injected, tail),
            Continuation::SwapCheckpoint { head } => {
                crate::swap::checkpoint::resume(repo, head, injected, tail)
            }
            Continuation::PickCherryWithReference { cherry, reference } => {
                crate::swap::pick_cherry_with_reference::resume(repo, cherry, reference, injected, tail)
            }
            Continuation::OrSquash { head } => {
                crate::swap::or_squash::resume(repo, head, injected, tail)
            }
            Continuation::KeepGoing { edit, baselines } => {
                crate::swap::keep_going::resume(repo, edit, baselines, injected, tail)
            }
            Continuation::KeepGoingUp { edit, cherries } => {
                crate::swap::keep_going::resume_up(repo, edit, cherries, injected, tail)
            }
        }
    }
}
