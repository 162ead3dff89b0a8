//! The `.git-queue` file: title, description, and the list of baselines a
//! patch stack is rebased onto. Serialized with `toml_edit` rather than the
//! original's custom YAML emitter -- the closest round-trip-stable,
//! comment-preserving structured-text format already in this crate's
//! dependency stack.

use serde::{Deserialize, Serialize};

pub use crate::vcs::Baseline;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueueFile {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
    #[serde(default)]
    pub baselines: Vec<Baseline>,
}

impl QueueFile {
    pub fn load(contents: &str) -> anyhow::Result<Self> {
        Ok(toml_edit::de::from_str(contents)?)
    }

    pub fn dumps(&self) -> anyhow::Result<String> {
        Ok(toml_edit::ser::to_string_pretty(self)?)
    }
}

/// The commit trailer every tool appends, so `queue rebase` knows which
/// commits are its own bookkeeping rather than user patches.
pub fn message(summary: &str, title: Option<&str>, tool: &str) -> String {
    match title {
        Some(title) => format!("{summary}: {title}\n\nTool: {tool}"),
        None => format!("{summary}\n\nTool: {tool}"),
    }
}

pub fn from_this_tool(message: &str, tool: &str) -> bool {
    message.trim_end().ends_with(&format!("\nTool: {tool}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_without_description() {
        let q = QueueFile {
            title: Some("my queue".into()),
            description: None,
            baselines: vec![Baseline {
                sha: "abc123".into(),
                ref_name: Some("refs/heads/main".into()),
                remote: None,
            }],
        };
        let dumped = q.dumps().unwrap();
        let loaded = QueueFile::load(&dumped).unwrap();
        assert_eq!(loaded.title.as_deref(), Some("my queue"));
        assert_eq!(loaded.baselines.len(), 1);
        assert_eq!(loaded.baselines[0].sha, "abc123");
    }

    #[test]
    fn trailer_round_trip() {
        let m = message("rebase", Some("title"), "queue");
        assert!(from_this_tool(&m, "queue"));
        assert!(!from_this_tool(&m, "swap"));
    }
}
