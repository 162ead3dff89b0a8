//! Integration coverage for the standalone `squash` binary, grounded on
//! `original_source/test/test_squash.py`.

mod common;

use common::TestRepo;

#[test]
fn squash_folds_commit_into_parent() {
    let repo = TestRepo::new();
    repo.commit("a", "aaa", "a");
    repo.commit("a", "aaa\nbbb", "b");
    let sha = repo.rev_parse("HEAD");
    assert_eq!(repo.log(), vec!["0", "a", "b"]);

    repo.bin("squash").arg("HEAD").assert().success();

    assert!(repo.diff_empty(&sha, "HEAD"));
    assert_eq!(repo.log(), vec!["0", "a"]);
    let message = repo.git(&["log", "-n1", "--pretty=format:%B", "HEAD"]);
    assert_eq!(message, "a\n\nb");
}

#[test]
fn squash_fixup_keeps_parent_message() {
    let repo = TestRepo::new();
    repo.commit("a", "aaa", "a");
    repo.commit("a", "aaa\nbbb", "b");
    let sha = repo.rev_parse("HEAD");

    repo.bin("squash").args(["--fixup", "HEAD"]).assert().success();

    assert!(repo.diff_empty(&sha, "HEAD"));
    assert_eq!(repo.log(), vec!["0", "a"]);
}

#[test]
fn squash_restores_branch_on_failure() {
    let repo = TestRepo::new();
    let before = repo.rev_parse("HEAD");

    // The root commit has no parent to squash into.
    repo.bin("squash").arg("HEAD").assert().failure();

    assert_eq!(repo.rev_parse("HEAD"), before);
}
