//! The singleton suspended-state file: `<git-dir>/continuation.json`.
//!
//! Its existence is the exclusive mutex for "an operation is in progress".
//! Written atomically (write to a sibling temp path, then rename) so a
//! crash mid-write never leaves a half-written file behind.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::continuation::Continuation;
use super::error::EngineError;

#[derive(Debug, Serialize, Deserialize)]
pub struct SuspendedState {
    pub tool: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub status: Option<String>,
    /// Outermost first.
    pub continuations: Vec<Continuation>,
}

pub fn exists(path: &Path) -> bool {
    path.exists()
}

pub fn load(path: &Path) -> Result<SuspendedState, EngineError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| EngineError::Vcs(anyhow::anyhow!("failed to read {}: {e}", path.display())))?;
    serde_json::from_str(&raw).map_err(|e| {
        EngineError::User(format!(
            "{} is corrupt or references an unknown continuation kind: {e}",
            path.display()
        ))
    })
}

pub fn delete(path: &Path) -> Result<(), EngineError> {
    std::fs::remove_file(path)
        .map_err(|e| EngineError::Vcs(anyhow::anyhow!("failed to remove {}: {e}", path.display())))
}

/// Write-then-rename, so a reader never observes a partially written file.
pub fn write(path: &Path, state: &SuspendedState) -> Result<(), EngineError> {
    let json = serde_json::to_string_pretty(state)
        .map_err(|e| EngineError::Vcs(anyhow::anyhow!("failed to serialize continuation state: {e}")))?;
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .map_err(|e| EngineError::Vcs(anyhow::anyhow!("failed to create temp file in {}: {e}", dir.display())))?;
    use std::io::Write;
    tmp.write_all(json.as_bytes())
        .and_then(|_| tmp.write_all(b"\n"))
        .map_err(|e| EngineError::Vcs(anyhow::anyhow!("failed to write continuation state: {e}")))?;
    tmp.persist(path)
        .map_err(|e| EngineError::Vcs(anyhow::anyhow!("failed to install continuation state: {e}")))?;
    Ok(())
}
