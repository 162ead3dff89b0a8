//! Create a temporary orphan branch with no content and no parents, named
//! deterministically (`temp-0`, `temp-1`, ...) so test output is
//! reproducible. Not itself a continuation kind — it is a thin setup
//! wrapper around [`super::delete_temp_branch`], the part that actually
//! needs to survive a suspend.

use std::collections::HashSet;

use crate::engine::EngineResult;
use crate::vcs::Repo;

use super::delete_temp_branch;

fn next_free_name(existing: &HashSet<String>) -> String {
    (0..)
        .map(|n| format!("temp-{n}"))
        .find(|name| !existing.contains(name))
        .expect("branch name probe is unbounded")
}

pub fn enter(repo: &Repo, body: impl FnOnce(&Repo, &str) -> EngineResult<()>) -> EngineResult<()> {
    let branches: HashSet<String> = repo.branches()?.into_iter().collect();
    let branch = next_free_name(&branches);
    let previous_head = repo.head()?;

    delete_temp_branch::enter(repo, branch.clone(), previous_head, |repo| {
        repo.run(&["checkout", "-q", "--orphan", &branch])?;
        repo.delete_index_and_files()?;
        body(repo, &branch)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probes_lowest_free_name() {
        let existing: HashSet<String> = ["temp-0", "temp-1"].into_iter().map(String::from).collect();
        assert_eq!(next_free_name(&existing), "temp-2");
    }

    #[test]
    fn probes_zero_when_empty() {
        assert_eq!(next_free_name(&HashSet::new()), "temp-0");
    }
}
