//! The serializable continuation engine: a closed registry of continuation
//! kinds, the suspend/resume signal mechanism, and the top-level/resume
//! drivers that turn a tool invocation's outcome into an exit code.

mod continuation;
mod driver;
mod error;
mod signal;
mod state_file;

pub use continuation::Continuation;
pub use driver::{Driver, EXIT_OK, EXIT_SUSPEND, EXIT_USER_ERROR};
pub use error::EngineError;
pub use signal::{EngineResult, Flow, ResumeKind, Suspend};
