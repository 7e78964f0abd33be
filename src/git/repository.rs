use std::path::{Path, PathBuf};

use git2::build::CheckoutBuilder;
use git2::{BranchType, Repository as Git2Repo, StatusOptions};
use tracing::debug;

use crate::error::{BumpkitError, Result};
use crate::git::MergeOutcome;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    /// Root of the working tree.
    pub fn workdir(&self) -> Result<PathBuf> {
        self.repo
            .workdir()
            .map(Path::to_path_buf)
            .ok_or_else(|| BumpkitError::Git(git2::Error::from_str("repository is bare")))
    }

    fn remote_callbacks<'a>() -> git2::RemoteCallbacks<'a> {
        let mut callbacks = git2::RemoteCallbacks::new();
        callbacks.credentials(|_url, username_from_url, allowed_types| {
            let username = username_from_url.unwrap_or("git");

            if allowed_types.contains(git2::CredentialType::SSH_KEY) {
                if let Ok(cred) = git2::Cred::ssh_key_from_agent(username) {
                    return Ok(cred);
                }

                if let Some(home) = dirs::home_dir() {
                    for key in ["id_ed25519", "id_rsa", "id_ecdsa"] {
                        let path = home.join(".ssh").join(key);
                        if path.exists() {
                            if let Ok(cred) = git2::Cred::ssh_key(username, None, &path, None) {
                                return Ok(cred);
                            }
                        }
                    }
                }
            }

            git2::Cred::default()
        });

        callbacks.push_update_reference(|refname, status| match status {
            Some(status) => Err(git2::Error::from_str(&format!(
                "remote rejected {}: {}",
                refname, status
            ))),
            None => Ok(()),
        });

        callbacks
    }
}

impl super::Repository for Git2Repository {
    fn is_dirty(&self) -> Result<bool> {
        let mut options = StatusOptions::new();
        options
            .include_untracked(false)
            .include_ignored(false)
            .exclude_submodules(true);

        let statuses = self.repo.statuses(Some(&mut options))?;
        Ok(!statuses.is_empty())
    }

    fn current_branch(&self) -> Result<String> {
        let head = self.repo.head()?;
        if !head.is_branch() {
            return Err(BumpkitError::Git(git2::Error::from_str(
                "HEAD is detached; check out a branch first",
            )));
        }

        head.shorthand()
            .map(str::to_string)
            .ok_or_else(|| BumpkitError::Git(git2::Error::from_str("branch name is not UTF-8")))
    }

    fn stage(&self, paths: &[PathBuf]) -> Result<()> {
        let mut index = self.repo.index()?;
        for path in paths {
            debug!(path = %path.display(), "staging");
            index.add_path(path)?;
        }
        index.write()?;
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<()> {
        let mut index = self.repo.index()?;
        let tree_id = index.write_tree()?;
        let tree = self.repo.find_tree(tree_id)?;
        let signature = self.repo.signature()?;
        let parent = self.repo.head()?.peel_to_commit()?;

        let oid = self.repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &[&parent],
        )?;
        debug!(%oid, "created commit");
        Ok(())
    }

    fn create_annotated_tag(&self, name: &str, message: &str) -> Result<()> {
        let head = self.repo.head()?.peel_to_commit()?;
        let signature = self.repo.signature()?;
        self.repo
            .tag(name, head.as_object(), &signature, message, false)?;
        Ok(())
    }

    fn checkout(&self, branch: &str) -> Result<()> {
        let refname = format!("refs/heads/{}", branch);
        let target = self.repo.revparse_single(&refname)?;

        self.repo
            .checkout_tree(&target, Some(CheckoutBuilder::new().safe()))?;
        self.repo.set_head(&refname)?;
        debug!(branch, "checked out");
        Ok(())
    }

    fn merge_fast_forward(&self, source: &str) -> Result<MergeOutcome> {
        let source_oid = self
            .repo
            .find_branch(source, BranchType::Local)?
            .get()
            .target()
            .ok_or_else(|| {
                BumpkitError::Git(git2::Error::from_str(&format!(
                    "branch '{}' has no target",
                    source
                )))
            })?;
        let annotated = self.repo.find_annotated_commit(source_oid)?;
        let (analysis, _) = self.repo.merge_analysis(&[&annotated])?;

        if analysis.is_up_to_date() {
            return Ok(MergeOutcome::UpToDate);
        }
        if !analysis.is_fast_forward() {
            return Ok(MergeOutcome::NotFastForward);
        }

        // Update the working tree first so a conflict leaves the branch where it was.
        let target = self.repo.find_commit(source_oid)?;
        self.repo
            .checkout_tree(target.as_object(), Some(CheckoutBuilder::new().safe()))?;

        let mut head = self.repo.head()?;
        head.set_target(source_oid, &format!("merge {}: Fast-forward", source))?;
        Ok(MergeOutcome::FastForwarded)
    }

    fn push(&self, remote: &str, branch: &str, tags: &[&str]) -> Result<()> {
        let mut remote = self.repo.find_remote(remote)?;

        let mut refspecs = vec![format!("refs/heads/{0}:refs/heads/{0}", branch)];
        refspecs.extend(tags.iter().map(|tag| format!("refs/tags/{0}:refs/tags/{0}", tag)));
        debug!(?refspecs, "pushing");

        let mut push_options = git2::PushOptions::new();
        push_options.remote_callbacks(Self::remote_callbacks());
        remote.push(&refspecs, Some(&mut push_options))?;
        Ok(())
    }
}
