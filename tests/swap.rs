//! Integration coverage for `swap`, grounded on the scenarios in spec.md
//! §8 (S1-S3, S6) and `original_source/test/test_swap.py`.

mod common;

use common::TestRepo;

#[test]
fn s1_basic_swap() {
    let repo = TestRepo::new();
    repo.commit("a", "aaa\nbbb\nccc", "a");
    repo.commit("x", "xxx\nyyy\nzzz", "x");
    assert_eq!(repo.log(), vec!["0", "a", "x"]);
    let sha = repo.rev_parse("HEAD");

    repo.bin("swap").assert().success();

    assert!(repo.diff_empty(&sha, "HEAD"));
    assert_eq!(repo.log(), vec!["0", "x", "a"]);
}

#[test]
fn s2_swap_at_root() {
    let repo = TestRepo::new();
    repo.write("a", "aaa\nbbb\nccc");
    repo.git(&["add", "."]);
    repo.git(&["commit", "-q", "--amend", "-m", "a"]);
    repo.commit("x", "xxx\nyyy\nzzz", "x");
    assert_eq!(repo.log(), vec!["a", "x"]);
    let sha = repo.rev_parse("HEAD");

    repo.bin("swap").assert().success();

    assert!(repo.diff_empty(&sha, "HEAD"));
    assert_eq!(repo.log(), vec!["x", "a"]);
    assert!(repo.branches().iter().all(|b| !b.contains("temp")));
}

#[test]
fn s3_resume_after_conflict() {
    let repo = TestRepo::new();
    repo.commit("a", "aaa", "a");
    repo.commit("a", "aaa\nbbb", "b");
    assert_eq!(repo.log(), vec!["0", "a", "b"]);
    let sha = repo.rev_parse("HEAD");

    repo.bin("swap").arg("--edit").assert().code(2);
    assert!(repo.path().join(".git/continuation.json").exists());

    repo.write("a", "bbb");
    repo.git(&["add", "-u"]);
    repo.bin("swap").arg("--continue").assert().success();

    assert!(repo.diff_empty(&sha, "HEAD"));
    assert_eq!(repo.log(), vec!["0", "b", "a"]);
    assert!(!repo.path().join(".git/continuation.json").exists());
}

#[test]
fn keep_going_walks_past_root() {
    // Grounded on test_keep_going_root_longer_empty: with no baseline
    // configured, `--keep-going` walks HEAD all the way down past the
    // root commit.
    let repo = TestRepo::new();
    for c in ["a", "b", "c", "d"] {
        repo.commit(c, c, c);
    }
    let sha = repo.rev_parse("HEAD");

    repo.bin("swap").arg("--keep-going").assert().success();

    assert!(repo.diff_empty(&sha, "HEAD"));
    assert_eq!(repo.log().join(""), "d0abc");
}

#[test]
fn s5_squash_completion() {
    // History a, b, B, c where b and B collide. `swap --edit :/B` suspends,
    // then `swap --squash` folds B into b.
    let repo = TestRepo::new();
    repo.commit("a", "a", "a");
    repo.commit("b", "bbb", "b");
    repo.write("b", "bbb\nBBB");
    repo.git(&["add", "."]);
    repo.git(&["commit", "-q", "-m", "B"]);
    repo.commit("c", "c", "c");

    repo.bin("swap").args(["--edit", ":/B"]).assert().code(2);
    assert!(repo.path().join(".git/continuation.json").exists());

    repo.bin("swap").arg("--squash").assert().success();

    assert_eq!(repo.log(), vec!["0", "a", "b", "c"]);
    let message = repo.git(&["log", "-n1", "--pretty=format:%B", "HEAD~1"]);
    assert_eq!(message, "b\n\nB");
    assert!(!repo.path().join(".git/continuation.json").exists());
}

#[test]
fn s6_abort_restores_original_state() {
    let repo = TestRepo::new();
    repo.commit("a", "aaa", "a");
    repo.commit("a", "aaa\nbbb", "b");
    let sha = repo.rev_parse("HEAD");

    repo.bin("swap").arg("--edit").assert().code(2);
    assert!(repo.path().join(".git/continuation.json").exists());

    repo.bin("swap").arg("--abort").assert().success();

    assert_eq!(repo.rev_parse("HEAD"), sha);
    assert!(repo.diff_empty(&sha, "HEAD"));
    assert!(!repo.path().join(".git/continuation.json").exists());
}
