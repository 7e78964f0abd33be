//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file.
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use git2::{Oid, Repository, Signature};

pub const VERSION_PATTERN: &str = r#"version = "(?P<version>[^"\s]+)""#;
pub const RUFF_REPO: &str = "https://github.com/astral-sh/ruff-pre-commit";

/// Get the path to test fixtures directory.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Read a fixture file as a string.
pub fn read_fixture(name: &str) -> String {
    let path = fixtures_dir().join(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read fixture {:?}: {}", path, e))
}

/// Minimal pyproject manifest with one version assignment.
pub fn pyproject(version: &str) -> String {
    format!(
        "[project]\nname = \"demo\"\nversion = \"{}\"\nrequires-python = \">=3.12\"\n",
        version
    )
}

/// Lock document with one `[[package]]` entry per (name, version).
pub fn uv_lock(packages: &[(&str, &str)]) -> String {
    let mut text = String::from("version = 1\nrequires-python = \">=3.12\"\n");
    for (name, version) in packages {
        text.push_str(&format!(
            "\n[[package]]\nname = \"{}\"\nversion = \"{}\"\nsource = {{ registry = \"https://pypi.org/simple\" }}\n",
            name, version
        ));
    }
    text
}

/// Pre-commit configuration with the ruff hook pinned at `rev`.
pub fn pre_commit_config(rev: &str) -> String {
    format!(
        "# hooks\nrepos:\n  - repo: https://github.com/pre-commit/pre-commit-hooks\n    rev: v4.6.0\n    hooks:\n      - id: end-of-file-fixer\n  - repo: {}\n    rev: {}\n    hooks:\n      - id: ruff\n        args: [--fix]\n      - id: ruff-format\n",
        RUFF_REPO, rev
    )
}

/// Write `content` to `name` below `dir`.
pub fn write(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).expect("Failed to write test file");
}

/// Read `name` below `dir`.
pub fn read(dir: &Path, name: &str) -> String {
    fs::read_to_string(dir.join(name)).expect("Failed to read test file")
}

/// A test git repository builder for integration tests.
pub struct TestRepo {
    pub dir: tempfile::TempDir,
    pub repo: Repository,
}

impl TestRepo {
    /// Create a repository on `main` with `pyproject.toml` committed at `version`.
    pub fn with_version(version: &str) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let repo = Repository::init(dir.path()).expect("Failed to init git repo");
        {
            let mut config = repo.config().expect("Failed to open repo config");
            config.set_str("user.name", "Test User").unwrap();
            config.set_str("user.email", "test@example.com").unwrap();
        }
        repo.set_head("refs/heads/main").expect("Failed to point HEAD at main");

        let test_repo = Self { dir, repo };
        write(test_repo.path(), "pyproject.toml", &pyproject(version));
        test_repo.commit_all("initial commit");
        test_repo
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    fn signature(&self) -> Signature<'_> {
        Signature::now("Test User", "test@example.com").expect("Failed to create signature")
    }

    /// Stage `pyproject.toml` and commit it. Returns the commit OID.
    pub fn commit_all(&self, message: &str) -> Oid {
        self.commit_path("pyproject.toml", message)
    }

    /// Write `name` and commit it. Returns the commit OID.
    pub fn commit_file(&self, name: &str, content: &str, message: &str) -> Oid {
        write(self.path(), name, content);
        self.commit_path(name, message)
    }

    fn commit_path(&self, name: &str, message: &str) -> Oid {
        let sig = self.signature();
        let mut index = self.repo.index().expect("Failed to get index");
        index.add_path(Path::new(name)).expect("Failed to add file");
        index.write().expect("Failed to write index");
        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");

        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("Failed to create commit")
    }

    /// Create a branch at HEAD and check it out.
    pub fn switch_to_new_branch(&self, name: &str) {
        let head = self.repo.head().unwrap().peel_to_commit().unwrap();
        self.repo.branch(name, &head, false).expect("Failed to create branch");
        self.repo
            .set_head(&format!("refs/heads/{}", name))
            .expect("Failed to switch branch");
    }

    /// Add a bare repository as remote `origin`. The returned dir must outlive the test.
    pub fn add_bare_origin(&self) -> (tempfile::TempDir, Repository) {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let bare = Repository::init_bare(dir.path()).expect("Failed to init bare repo");
        let url = dir.path().to_str().expect("temp path is not UTF-8").to_string();
        self.repo.remote("origin", &url).expect("Failed to add remote");
        (dir, bare)
    }

    /// Commit OID a reference points at, peeling annotated tags.
    pub fn commit_of(repo: &Repository, refname: &str) -> Option<Oid> {
        repo.find_reference(refname)
            .ok()
            .and_then(|r| r.peel_to_commit().ok())
            .map(|c| c.id())
    }
}
