//! Check out a baseline commit, or fabricate an empty orphan branch when
//! none is given (swap at the root of history has no parent to check out).

use crate::engine::EngineResult;
use crate::vcs::Repo;

use super::temp_branch;

pub fn enter(repo: &Repo, sha: Option<&str>, body: impl FnOnce(&Repo) -> EngineResult<()>) -> EngineResult<()> {
    match sha {
        Some(sha) => {
            repo.checkout(sha)?;
            body(repo)
        }
        None => temp_branch::enter(repo, |repo, _branch| body(repo)),
    }
}
