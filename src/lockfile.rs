//! Regeneration of the dependency lock artifact after a version bump.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::config::LockfileConfig;
use crate::error::{BumpkitError, Result};

/// Something that can bring the lock artifact in line with the rewritten manifest.
pub trait LockRefresher {
    /// Regenerate the lock artifact.
    fn refresh(&self) -> Result<()>;

    /// Lock artifact to stage alongside the version files, if any.
    fn artifact(&self) -> Option<&Path>;
}

/// Runs an external command (e.g. `uv lock`) in the project root.
pub struct CommandLockRefresher {
    program: String,
    args: Vec<String>,
    root: PathBuf,
    artifact: PathBuf,
}

impl CommandLockRefresher {
    /// Build from configuration, or `None` when refresh is disabled.
    pub fn from_config(config: &LockfileConfig, root: &Path) -> Option<Self> {
        if !config.enabled {
            return None;
        }
        let (program, args) = config.command.split_first()?;
        Some(CommandLockRefresher {
            program: program.clone(),
            args: args.to_vec(),
            root: root.to_path_buf(),
            artifact: config.path.clone(),
        })
    }
}

impl LockRefresher for CommandLockRefresher {
    fn refresh(&self) -> Result<()> {
        debug!(program = %self.program, args = ?self.args, "refreshing lock artifact");

        let output = Command::new(&self.program)
            .args(&self.args)
            .current_dir(&self.root)
            .output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(BumpkitError::Io(std::io::Error::other(format!(
                "{} exited with code {}: {}",
                self.program,
                output.status.code().unwrap_or(-1),
                stderr.trim()
            ))));
        }

        Ok(())
    }

    fn artifact(&self) -> Option<&Path> {
        Some(&self.artifact)
    }
}

/// Refresher used when lock regeneration is turned off.
pub struct NoLockRefresh;

impl LockRefresher for NoLockRefresh {
    fn refresh(&self) -> Result<()> {
        Ok(())
    }

    fn artifact(&self) -> Option<&Path> {
        None
    }
}
