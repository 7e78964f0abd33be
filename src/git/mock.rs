use std::cell::RefCell;
use std::path::PathBuf;

use crate::error::{BumpkitError, Result};
use crate::git::{MergeOutcome, Repository};

/// A repository operation recorded by [MockRepository].
#[derive(Debug, Clone, PartialEq)]
pub enum RepoCall {
    Stage(Vec<PathBuf>),
    Commit(String),
    Tag { name: String, message: String },
    Checkout(String),
    Merge(String),
    Push {
        remote: String,
        branch: String,
        tags: Vec<String>,
    },
}

/// Mock repository for testing without actual git operations
pub struct MockRepository {
    dirty: bool,
    branch: RefCell<String>,
    merge_outcome: MergeOutcome,
    fail_push: bool,
    calls: RefCell<Vec<RepoCall>>,
}

impl MockRepository {
    /// Create a clean mock repository on `main`
    pub fn new() -> Self {
        MockRepository {
            dirty: false,
            branch: RefCell::new("main".to_string()),
            merge_outcome: MergeOutcome::FastForwarded,
            fail_push: false,
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn with_branch(self, branch: impl Into<String>) -> Self {
        self.branch.replace(branch.into());
        self
    }

    pub fn with_dirty(mut self, dirty: bool) -> Self {
        self.dirty = dirty;
        self
    }

    pub fn with_merge_outcome(mut self, outcome: MergeOutcome) -> Self {
        self.merge_outcome = outcome;
        self
    }

    pub fn with_failing_push(mut self) -> Self {
        self.fail_push = true;
        self
    }

    /// Operations performed so far, in order
    pub fn calls(&self) -> Vec<RepoCall> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: RepoCall) {
        self.calls.borrow_mut().push(call);
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn is_dirty(&self) -> Result<bool> {
        Ok(self.dirty)
    }

    fn current_branch(&self) -> Result<String> {
        Ok(self.branch.borrow().clone())
    }

    fn stage(&self, paths: &[PathBuf]) -> Result<()> {
        self.record(RepoCall::Stage(paths.to_vec()));
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<()> {
        self.record(RepoCall::Commit(message.to_string()));
        Ok(())
    }

    fn create_annotated_tag(&self, name: &str, message: &str) -> Result<()> {
        self.record(RepoCall::Tag {
            name: name.to_string(),
            message: message.to_string(),
        });
        Ok(())
    }

    fn checkout(&self, branch: &str) -> Result<()> {
        self.branch.replace(branch.to_string());
        self.record(RepoCall::Checkout(branch.to_string()));
        Ok(())
    }

    fn merge_fast_forward(&self, source: &str) -> Result<MergeOutcome> {
        self.record(RepoCall::Merge(source.to_string()));
        Ok(self.merge_outcome)
    }

    fn push(&self, remote: &str, branch: &str, tags: &[&str]) -> Result<()> {
        if self.fail_push {
            return Err(BumpkitError::Git(git2::Error::from_str("push rejected")));
        }
        self.record(RepoCall::Push {
            remote: remote.to_string(),
            branch: branch.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        });
        Ok(())
    }
}
