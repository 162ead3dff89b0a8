//! Integration coverage for `edit`, grounded on
//! `original_source/src/gitq/git_edit.py`'s suspend-then-restore design.

mod common;

use common::TestRepo;

#[test]
fn edit_amends_then_restores_commits_above() {
    let repo = TestRepo::new();
    repo.commit("a", "aaa", "a");
    repo.commit("b", "bbb", "b");
    assert_eq!(repo.log(), vec!["0", "a", "b"]);

    repo.bin("edit").arg(":/a").assert().code(2);
    assert!(repo.path().join(".git/continuation.json").exists());

    repo.write("a", "aaa\nextra");
    repo.git(&["add", "-u"]);
    repo.git(&["commit", "--amend", "-q", "-m", "a"]);

    repo.bin("edit").arg("--continue").assert().success();

    assert_eq!(repo.log(), vec!["0", "a", "b"]);
    assert!(!repo.path().join(".git/continuation.json").exists());
    assert_eq!(
        repo.git(&["show", "HEAD~1:a"]),
        "aaa\nextra"
    );
}

#[test]
fn edit_status_reports_in_progress() {
    let repo = TestRepo::new();
    repo.commit("a", "aaa", "a");

    repo.bin("edit").arg("HEAD").assert().code(2);

    // `.git/continuation.json` records which tool owns the suspended state.
    let state = std::fs::read_to_string(repo.path().join(".git/continuation.json")).unwrap();
    assert!(state.contains("\"tool\": \"edit\""));

    repo.bin("edit").arg("--status").assert().success();
}
