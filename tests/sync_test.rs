mod common;

use std::process::Command;

use bumpkit::config::SyncConfig;
use bumpkit::error::BumpkitError;
use bumpkit::sync::{run_sync, SyncOutcome};

use common::{pre_commit_config, read, uv_lock, write};

fn project(lock: &str, hooks: &str) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "uv.lock", lock);
    write(dir.path(), ".pre-commit-config.yaml", hooks);
    dir
}

fn sync_binary() -> Command {
    Command::new(env!("CARGO_BIN_EXE_sync-hook-version"))
}

#[test]
fn test_already_in_sync() {
    let hooks = pre_commit_config("v0.5.0");
    let dir = project(&uv_lock(&[("ruff", "0.5.0")]), &hooks);

    let outcome = run_sync(dir.path(), &SyncConfig::default()).unwrap();

    assert_eq!(
        outcome,
        SyncOutcome::InSync {
            version: "0.5.0".to_string()
        }
    );
    assert_eq!(read(dir.path(), ".pre-commit-config.yaml"), hooks);
}

#[test]
fn test_rewrites_hook_to_lock_version() {
    let dir = project(
        &uv_lock(&[("pytest", "8.2.0"), ("ruff", "0.6.0")]),
        &pre_commit_config("v0.5.0"),
    );

    let outcome = run_sync(dir.path(), &SyncConfig::default()).unwrap();

    assert_eq!(
        outcome,
        SyncOutcome::Updated {
            from: "0.5.0".to_string(),
            to: "0.6.0".to_string()
        }
    );
    assert_eq!(
        read(dir.path(), ".pre-commit-config.yaml"),
        pre_commit_config("v0.6.0")
    );
}

#[test]
fn test_unexpected_indentation_is_not_written() {
    let hooks = format!(
        "repos:\n- repo: {}\n  rev: v0.5.0\n  hooks:\n  - id: ruff\n",
        common::RUFF_REPO
    );
    let dir = project(&uv_lock(&[("ruff", "0.6.0")]), &hooks);

    let err = run_sync(dir.path(), &SyncConfig::default()).unwrap_err();

    assert!(matches!(err, BumpkitError::ReplacementNotFound { .. }));
    assert_eq!(read(dir.path(), ".pre-commit-config.yaml"), hooks);
}

#[test]
fn test_missing_lock_entry_fails_before_touching_files() {
    let hooks = pre_commit_config("v0.5.0");
    let dir = project(&uv_lock(&[("pytest", "8.2.0")]), &hooks);

    let err = run_sync(dir.path(), &SyncConfig::default()).unwrap_err();

    assert!(matches!(err, BumpkitError::Pin(_)));
    assert_eq!(read(dir.path(), ".pre-commit-config.yaml"), hooks);
}

#[test]
fn test_missing_files_are_fatal() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "uv.lock", &uv_lock(&[("ruff", "0.5.0")]));

    let err = run_sync(dir.path(), &SyncConfig::default()).unwrap_err();
    assert!(matches!(err, BumpkitError::MissingFile(_)));
}

#[test]
fn test_custom_package_and_repo() {
    let repo = "https://github.com/psf/black-pre-commit-mirror";
    let hooks = format!("repos:\n  - repo: {}\n    rev: 24.3.0\n", repo);
    let dir = project(&uv_lock(&[("black", "24.4.2")]), &hooks);

    let config = SyncConfig {
        package: "black".to_string(),
        hook_repo: repo.to_string(),
        ..SyncConfig::default()
    };

    // the unprefixed rev cannot match the `rev: v<old>` block
    let err = run_sync(dir.path(), &config).unwrap_err();
    assert!(matches!(err, BumpkitError::ReplacementNotFound { .. }));
}

#[test]
fn test_binary_in_sync_exits_zero() {
    let dir = project(
        &uv_lock(&[("ruff", "0.5.0")]),
        &pre_commit_config("v0.5.0"),
    );

    let output = sync_binary().arg("-C").arg(dir.path()).output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("already pinned at 0.5.0"), "got: {}", stdout);
}

#[test]
fn test_binary_updates_and_exits_zero() {
    let dir = project(
        &uv_lock(&[("ruff", "0.6.0")]),
        &pre_commit_config("v0.5.0"),
    );

    let output = sync_binary().arg("-C").arg(dir.path()).output().unwrap();

    assert!(output.status.success());
    assert_eq!(
        read(dir.path(), ".pre-commit-config.yaml"),
        pre_commit_config("v0.6.0")
    );
}

#[test]
fn test_binary_unmatched_block_exits_non_zero() {
    let hooks = format!("repos:\n- repo: {}\n  rev: v0.5.0\n", common::RUFF_REPO);
    let dir = project(&uv_lock(&[("ruff", "0.6.0")]), &hooks);

    let output = sync_binary().arg("-C").arg(dir.path()).output().unwrap();

    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("manually"), "got: {}", stdout);
    assert_eq!(read(dir.path(), ".pre-commit-config.yaml"), hooks);
}

#[test]
fn test_binary_missing_lock_entry_exits_non_zero() {
    let dir = project(&uv_lock(&[]), &pre_commit_config("v0.5.0"));

    let output = sync_binary().arg("-C").arg(dir.path()).output().unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no ruff version found"), "got: {}", stderr);
}
