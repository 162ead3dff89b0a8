//! Parsed views of VCS objects: commits, author/committer identities, and
//! the baselines a patch stack is built on.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::error::GitError;

static AUTHOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([^<>]+) <([^<>]+)> ([\d\-+\s]+?)\s*$").unwrap());

/// A parsed `name <email> date` identity line, as it appears on the
/// `author`/`committer` header of `git log --pretty=raw` output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorDate {
    pub name: String,
    pub email: String,
    pub date: String,
}

impl AuthorDate {
    pub fn parse(raw: &str) -> Result<Self, GitError> {
        let caps = AUTHOR_RE.captures(raw).ok_or_else(|| GitError::ParseError {
            message: format!("could not parse author/committer line: {raw:?}"),
        })?;
        Ok(Self {
            name: caps[1].to_string(),
            email: caps[2].to_string(),
            date: caps[3].to_string(),
        })
    }
}

/// Immutable view of a VCS commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub sha: String,
    pub tree: String,
    pub parents: Vec<String>,
    pub author: AuthorDate,
    pub committer: AuthorDate,
    pub message: String,
}

impl Commit {
    /// Parse the output of `git log -n1 --pretty=raw <ref>`.
    pub fn parse_raw(output: &str) -> Result<Self, GitError> {
        let mut lines = output.lines();
        let mut sha = None;
        let mut tree = None;
        let mut parents = Vec::new();
        let mut author = None;
        let mut committer = None;

        for line in &mut lines {
            if line.is_empty() {
                break;
            }
            if let Some(rest) = line.strip_prefix("commit ") {
                sha = Some(rest.trim().to_string());
            } else if let Some(rest) = line.strip_prefix("tree ") {
                tree = Some(rest.trim().to_string());
            } else if let Some(rest) = line.strip_prefix("parent ") {
                parents.push(rest.trim().to_string());
            } else if let Some(rest) = line.strip_prefix("author ") {
                author = Some(AuthorDate::parse(rest)?);
            } else if let Some(rest) = line.strip_prefix("committer ") {
                committer = Some(AuthorDate::parse(rest)?);
            }
            // unknown header lines (e.g. gpgsig) are ignored
        }

        let message: String = lines
            .map(|line| line.strip_prefix("    ").unwrap_or(line))
            .collect::<Vec<_>>()
            .join("\n");
        // `git log --pretty=raw` always ends the message with a trailing
        // blank line; trim exactly the trailing newlines, not interior ones.
        let message = message.trim_end_matches('\n').to_string();

        Ok(Self {
            sha: sha.ok_or_else(|| GitError::ParseError {
                message: "missing commit header".into(),
            })?,
            tree: tree.ok_or_else(|| GitError::ParseError {
                message: "missing tree header".into(),
            })?,
            parents,
            author: author.ok_or_else(|| GitError::ParseError {
                message: "missing author header".into(),
            })?,
            committer: committer.ok_or_else(|| GitError::ParseError {
                message: "missing committer header".into(),
            })?,
            message,
        })
    }

    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }

    /// First line of the commit message, used in suspend status text.
    pub fn summary(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }

    pub fn short(&self) -> &str {
        &self.sha[..self.sha.len().min(10)]
    }

    /// The commit's single parent. Fails if the commit is a merge or a root.
    pub fn unique_parent(&self) -> Result<Option<&str>, GitError> {
        match self.parents.as_slice() {
            [] => Ok(None),
            [parent] => Ok(Some(parent.as_str())),
            _ => Err(GitError::MergeFound {
                sha: self.sha.clone(),
            }),
        }
    }
}

/// The upstream reference a patch stack is built on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Baseline {
    pub sha: String,
    #[serde(rename = "ref", skip_serializing_if = "Option::is_none", default)]
    pub ref_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub remote: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_author_line() {
        let a = AuthorDate::parse("Jane Doe <jane@example.com> 1700000000 -0700").unwrap();
        assert_eq!(a.name, "Jane Doe");
        assert_eq!(a.email, "jane@example.com");
        assert_eq!(a.date, "1700000000 -0700");
    }

    #[test]
    fn parses_raw_commit() {
        let raw = "commit abc123\n\
                    tree def456\n\
                    parent 000111\n\
                    author Jane Doe <jane@example.com> 1700000000 -0700\n\
                    committer Jane Doe <jane@example.com> 1700000000 -0700\n\
                    \n\
                    \u{20}\u{20}\u{20}\u{20}Fix the thing\n\
                    \n\
                    \u{20}\u{20}\u{20}\u{20}Longer body.\n";
        let c = Commit::parse_raw(raw).unwrap();
        assert_eq!(c.sha, "abc123");
        assert_eq!(c.tree, "def456");
        assert_eq!(c.parents, vec!["000111".to_string()]);
        assert_eq!(c.message, "Fix the thing\n\nLonger body.");
        assert!(!c.is_merge());
    }

    #[test]
    fn merge_commit_has_no_unique_parent() {
        let raw = "commit abc123\n\
                    tree def456\n\
                    parent 111\n\
                    parent 222\n\
                    author Jane Doe <jane@example.com> 1700000000 -0700\n\
                    committer Jane Doe <jane@example.com> 1700000000 -0700\n\
                    \n\
                    \u{20}\u{20}\u{20}\u{20}Merge\n";
        let c = Commit::parse_raw(raw).unwrap();
        assert!(c.is_merge());
        assert!(matches!(c.unique_parent(), Err(GitError::MergeFound { .. })));
    }
}
