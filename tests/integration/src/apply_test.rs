//! End-to-end tests for the `tpl apply` command
//!
//! Each test builds a local template git repository and a target git
//! repository in temp directories, then drives the real binary. Stdin is
//! never a terminal here, so `ask` conflicts must always resolve to skip.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Commit everything in `path` as the initial commit of a fresh repo
fn commit_all(path: &Path) {
    let repo = git2::Repository::init(path).unwrap();
    let mut index = repo.index().unwrap();
    index
        .add_all(["*"].iter(), git2::IndexAddOption::DEFAULT, None)
        .unwrap();
    index.write().unwrap();
    let tree_id = index.write_tree().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();
    let sig = git2::Signature::now("test", "test@example.com").unwrap();
    repo.commit(Some("HEAD"), &sig, &sig, "init", &tree, &[])
        .unwrap();
}

/// A template repo with a workflow file and one hook script
fn make_template() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    let workflows = root.join(".github/workflows");
    fs::create_dir_all(&workflows).unwrap();
    fs::write(
        workflows.join("tag-release.yml"),
        "env:\n  PROGRAM_NAME: \"<Enter System Name>\"\nsteps: build\n",
    )
    .unwrap();

    let hooks = root.join("tools/git-hooks");
    fs::create_dir_all(&hooks).unwrap();
    fs::write(hooks.join("pre-commit"), "#!/bin/sh\nexit 0\n").unwrap();

    commit_all(root);
    temp
}

/// An empty target git repository
fn make_target() -> TempDir {
    let temp = TempDir::new().unwrap();
    git2::Repository::init(temp.path()).unwrap();
    temp
}

fn tpl(target: &Path, template: &Path) -> Command {
    let mut cmd = Command::cargo_bin("tpl").unwrap();
    cmd.current_dir(target)
        .arg("apply")
        .arg("--template")
        .arg(template);
    cmd
}

#[test]
fn apply_copies_into_fresh_repo() {
    let template = make_template();
    let target = make_target();

    tpl(target.path(), template.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("+1 copied"))
        .stdout(predicate::str::contains("Git hooks enabled"));

    assert!(
        target
            .path()
            .join(".github/workflows/tag-release.yml")
            .exists()
    );
    assert!(target.path().join("tools/git-hooks/pre-commit").exists());

    // core.hooksPath registered at the default location
    let repo = git2::Repository::open(target.path()).unwrap();
    let config = repo.config().unwrap();
    assert_eq!(
        config.get_string("core.hooksPath").unwrap(),
        tpl_core::config::DEFAULT_HOOKS_PATH
    );
}

#[cfg(unix)]
#[test]
fn apply_marks_hooks_executable() {
    use std::os::unix::fs::PermissionsExt;

    let template = make_template();
    let target = make_target();

    tpl(target.path(), template.path()).assert().success();

    let mode = fs::metadata(target.path().join("tools/git-hooks/pre-commit"))
        .unwrap()
        .permissions()
        .mode();
    assert_eq!(mode & 0o111, 0o111);
}

#[test]
fn apply_outside_git_repo_fails() {
    let template = make_template();
    let not_a_repo = TempDir::new().unwrap();

    tpl(not_a_repo.path(), template.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("git repo root"));
}

#[test]
fn missing_template_path_is_a_warning() {
    let template = make_template();
    let target = make_target();

    tpl(target.path(), template.path())
        .arg("--paths")
        .arg("does/not/exist")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not found in template"));
}

#[test]
fn identical_file_under_ask_is_skipped() {
    let template = make_template();
    let target = make_target();

    let workflows = target.path().join(".github/workflows");
    fs::create_dir_all(&workflows).unwrap();
    fs::write(
        workflows.join("tag-release.yml"),
        "env:\n  PROGRAM_NAME: \"<Enter System Name>\"\nsteps: build\n",
    )
    .unwrap();

    tpl(target.path(), template.path())
        .arg("--paths")
        .arg(".github/workflows")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 skipped"))
        .stdout(predicate::str::contains("overwritten=0"));
}

#[test]
fn masked_manifest_divergence_counts_as_same() {
    let template = make_template();
    let target = make_target();

    // Same manifest except for the masked PROGRAM_NAME value
    let workflows = target.path().join(".github/workflows");
    fs::create_dir_all(&workflows).unwrap();
    fs::write(
        workflows.join("tag-release.yml"),
        "env:\n  PROGRAM_NAME: \"myProject\"\nsteps: build\n",
    )
    .unwrap();

    tpl(target.path(), template.path())
        .arg("--paths")
        .arg(".github/workflows")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 skipped"))
        .stdout(predicate::str::contains("overwritten=0"));

    // Local value untouched
    let content = fs::read_to_string(workflows.join("tag-release.yml")).unwrap();
    assert!(content.contains("myProject"));
}

#[test]
fn conflicting_file_without_tty_is_never_overwritten() {
    let template = make_template();
    let target = make_target();

    let workflows = target.path().join(".github/workflows");
    fs::create_dir_all(&workflows).unwrap();
    fs::write(workflows.join("tag-release.yml"), "completely different\n").unwrap();

    tpl(target.path(), template.path())
        .arg("--paths")
        .arg(".github/workflows")
        .assert()
        .success()
        .stdout(predicate::str::contains("overwritten=0"));

    let content = fs::read_to_string(workflows.join("tag-release.yml")).unwrap();
    assert_eq!(content, "completely different\n");
}

#[test]
fn overwrite_policy_replaces_local_edits() {
    let template = make_template();
    let target = make_target();

    let workflows = target.path().join(".github/workflows");
    fs::create_dir_all(&workflows).unwrap();
    fs::write(workflows.join("tag-release.yml"), "local edit\n").unwrap();

    tpl(target.path(), template.path())
        .arg("--paths")
        .arg(".github/workflows")
        .arg("--on-existing")
        .arg("overwrite")
        .assert()
        .success()
        .stdout(predicate::str::contains("~1 overwritten"));

    let content = fs::read_to_string(workflows.join("tag-release.yml")).unwrap();
    assert!(content.contains("PROGRAM_NAME"));
}

#[test]
fn skip_policy_reports_skip_without_overwrite_count() {
    let template = make_template();
    let target = make_target();

    let workflows = target.path().join(".github/workflows");
    fs::create_dir_all(&workflows).unwrap();
    fs::write(workflows.join("tag-release.yml"), "local edit\n").unwrap();

    tpl(target.path(), template.path())
        .arg("--paths")
        .arg(".github/workflows")
        .arg("--on-existing")
        .arg("skip")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 skipped"));

    let content = fs::read_to_string(workflows.join("tag-release.yml")).unwrap();
    assert_eq!(content, "local edit\n");
}

#[test]
fn second_overwrite_run_is_idempotent() {
    let template = make_template();
    let target = make_target();

    for _ in 0..2 {
        tpl(target.path(), template.path())
            .arg("--on-existing")
            .arg("overwrite")
            .assert()
            .success();
    }

    let content = fs::read_to_string(
        target.path().join(".github/workflows/tag-release.yml"),
    )
    .unwrap();
    assert!(content.contains("PROGRAM_NAME"));
    // No stray backups from unconditional overwrites
    assert!(
        !target
            .path()
            .join(".github/workflows/tag-release.yml.bak")
            .exists()
    );
}
