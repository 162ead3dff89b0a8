//! The `queue` tool's data model and rebase orchestration: a `.git-queue`
//! file recording a patch stack's baselines, and the logic to replay its
//! patches on top of freshly refreshed baselines.

pub mod file;
pub mod rebase;

pub use file::{Baseline, QueueFile};
pub use rebase::Queue;
