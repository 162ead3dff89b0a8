//! Integration coverage for `queue`, grounded on
//! `original_source/test/test_rebase.py`.

mod common;

use common::TestRepo;

#[test]
fn queue_init_and_rebase_single_baseline() {
    let repo = TestRepo::new();
    let branch = repo.git(&["symbolic-ref", "--short", "HEAD"]);

    repo.commit("a", "a", "a");
    repo.git(&["branch", "base"]);
    let base0 = repo.rev_parse("base");

    repo.commit("b", "b", "b");

    repo.bin("queue").args(["init", "base"]).assert().success();
    assert_eq!(repo.log(), vec!["0", "a", "b", "initialized queue"]);

    let queuefile = std::fs::read_to_string(repo.path().join(".git-queue")).unwrap();
    assert!(queuefile.contains(&base0));

    repo.git(&["checkout", "base"]);
    repo.write("a", "A");
    repo.git(&["commit", "-a", "-q", "--amend", "-m", "A"]);
    let base1 = repo.rev_parse("HEAD");
    repo.git(&["checkout", &branch]);

    repo.bin("queue").arg("rebase").assert().success();

    assert_eq!(repo.log(), vec!["0", "A", "baseline", "b"]);
    let queuefile = std::fs::read_to_string(repo.path().join(".git-queue")).unwrap();
    assert!(queuefile.contains(&base1));
}

#[test]
fn queue_tidy_rewrites_queuefile_in_place() {
    let repo = TestRepo::new();
    repo.commit("a", "a", "a");
    repo.git(&["branch", "base"]);
    repo.commit("b", "b", "b");

    repo.bin("queue").args(["init", "base", "--title", "my queue"]).assert().success();

    repo.bin("queue").arg("tidy").assert().success();

    let queuefile = std::fs::read_to_string(repo.path().join(".git-queue")).unwrap();
    assert!(queuefile.contains("my queue"));
}

#[test]
fn queue_rebase_without_init_fails() {
    let repo = TestRepo::new();
    repo.commit("a", "a", "a");

    repo.bin("queue").arg("rebase").assert().failure();
}
