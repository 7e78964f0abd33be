//! Git operations abstraction layer
//!
//! The bump workflow talks to version control only through the
//! [Repository] trait, so it can run against a real repository or a mock.
//!
//! - [repository::Git2Repository]: a real implementation using the `git2` crate
//! - [mock::MockRepository]: a recording implementation for tests

pub mod mock;
pub mod repository;

pub use mock::{MockRepository, RepoCall};
pub use repository::Git2Repository;

use std::path::PathBuf;

use crate::error::Result;

/// Outcome of a fast-forward-only merge attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The target already contained the source branch
    UpToDate,
    /// The target was advanced to the source branch head
    FastForwarded,
    /// The branches have diverged; nothing was changed
    NotFastForward,
}

/// Version-control operations needed to publish a version bump.
///
/// All paths are relative to the repository working directory.
pub trait Repository {
    /// Whether tracked files have staged or unstaged changes.
    ///
    /// Untracked files do not count.
    fn is_dirty(&self) -> Result<bool>;

    /// Short name of the checked-out branch.
    ///
    /// Fails when HEAD is detached.
    fn current_branch(&self) -> Result<String>;

    /// Add the given files to the index.
    fn stage(&self, paths: &[PathBuf]) -> Result<()>;

    /// Commit the index on top of HEAD.
    fn commit(&self, message: &str) -> Result<()>;

    /// Create an annotated tag on HEAD.
    fn create_annotated_tag(&self, name: &str, message: &str) -> Result<()>;

    /// Switch the working tree and HEAD to a local branch.
    fn checkout(&self, branch: &str) -> Result<()>;

    /// Fast-forward the checked-out branch to `source`, never creating a merge commit.
    fn merge_fast_forward(&self, source: &str) -> Result<MergeOutcome>;

    /// Push a branch and the given tags to a remote.
    fn push(&self, remote: &str, branch: &str, tags: &[&str]) -> Result<()>;
}
