//! Keeps the lint hook revision in the pre-commit configuration in line
//! with the version pinned in the dependency lockfile.
//!
//! The lockfile is the source of truth. The hook configuration is only ever
//! rewritten by a literal text replacement, so comments and layout survive.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::config::SyncConfig;
use crate::error::{BumpkitError, Result};

#[derive(Debug, Deserialize)]
struct LockDocument {
    #[serde(default)]
    package: Vec<LockedPackage>,
}

/// A `[[package]]` entry of the lock document.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LockedPackage {
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HookDocument {
    #[serde(default)]
    repos: Vec<HookRepo>,
}

/// A `repos:` entry of the hook configuration.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct HookRepo {
    pub repo: String,
    #[serde(default)]
    pub rev: Option<String>,
}

/// Result of a sync run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Both files already pin the same version
    InSync { version: String },
    /// The hook configuration was rewritten
    Updated { from: String, to: String },
}

/// Version of `package` pinned in the lock document.
///
/// Exactly one entry with that name must exist and carry a version.
pub fn locked_version(lock_text: &str, lock_path: &Path, package: &str) -> Result<String> {
    let doc: LockDocument = toml::from_str(lock_text).map_err(|source| BumpkitError::Toml {
        path: lock_path.to_path_buf(),
        source,
    })?;

    let versions: Vec<Option<String>> = doc
        .package
        .into_iter()
        .filter(|p| p.name == package)
        .map(|p| p.version)
        .collect();

    match versions.as_slice() {
        [] => Err(BumpkitError::pin(format!(
            "no {} version found in {}",
            package,
            lock_path.display()
        ))),
        [Some(version)] => Ok(version.clone()),
        [None] => Err(BumpkitError::pin(format!(
            "{} entry in {} has no version",
            package,
            lock_path.display()
        ))),
        _ => Err(BumpkitError::pin(format!(
            "could not determine a unique {} version from {} ({} entries)",
            package,
            lock_path.display(),
            versions.len()
        ))),
    }
}

/// Revision pinned for `hook_repo` in the hook configuration, without its leading `v`.
pub fn hook_version(hook_text: &str, hook_path: &Path, hook_repo: &str) -> Result<String> {
    let doc: HookDocument =
        serde_yaml_bw::from_str(hook_text).map_err(|source| BumpkitError::Yaml {
            path: hook_path.to_path_buf(),
            source,
        })?;

    let revs: Vec<Option<String>> = doc
        .repos
        .into_iter()
        .filter(|r| r.repo == hook_repo)
        .map(|r| r.rev)
        .collect();

    match revs.as_slice() {
        [] => Err(BumpkitError::pin(format!(
            "no hook for {} found in {}",
            hook_repo,
            hook_path.display()
        ))),
        [Some(rev)] => Ok(rev.strip_prefix('v').unwrap_or(rev).to_string()),
        [None] => Err(BumpkitError::pin(format!(
            "hook for {} in {} has no rev",
            hook_repo,
            hook_path.display()
        ))),
        _ => Err(BumpkitError::pin(format!(
            "could not determine a unique rev for {} from {} ({} entries)",
            hook_repo,
            hook_path.display(),
            revs.len()
        ))),
    }
}

/// The two-line block identifying the hook and its pinned revision.
pub fn hook_block(hook_repo: &str, version: &str) -> String {
    format!("repo: {}\n    rev: v{}", hook_repo, version)
}

/// Replace the hook's pinned revision in the raw configuration text.
///
/// Fails when the literal block is not present, e.g. because of different
/// indentation, so nothing gets written.
pub fn rewrite_hook_config(
    hook_text: &str,
    hook_path: &Path,
    hook_repo: &str,
    old_version: &str,
    new_version: &str,
) -> Result<String> {
    let old_block = hook_block(hook_repo, old_version);
    let new_block = hook_block(hook_repo, new_version);
    let rewritten = hook_text.replace(&old_block, &new_block);

    if rewritten == hook_text {
        return Err(BumpkitError::ReplacementNotFound {
            path: hook_path.to_path_buf(),
            pattern: old_block,
        });
    }

    Ok(rewritten)
}

fn require_file(root: &Path, relative: &Path) -> Result<PathBuf> {
    let path = root.join(relative);
    if !path.is_file() {
        return Err(BumpkitError::MissingFile(path));
    }
    Ok(path)
}

/// Compare both pins under `root` and rewrite the hook configuration if they differ.
pub fn run_sync(root: &Path, config: &SyncConfig) -> Result<SyncOutcome> {
    let lock_path = require_file(root, &config.lock_file)?;
    let hook_path = require_file(root, &config.hook_config)?;

    let lock_text = fs::read_to_string(&lock_path)?;
    let hook_text = fs::read_to_string(&hook_path)?;

    let lock_version = locked_version(&lock_text, &lock_path, &config.package)?;
    debug!(package = %config.package, version = %lock_version, "lockfile pin");
    let pinned = hook_version(&hook_text, &hook_path, &config.hook_repo)?;
    debug!(repo = %config.hook_repo, version = %pinned, "hook pin");

    if lock_version == pinned {
        return Ok(SyncOutcome::InSync {
            version: lock_version,
        });
    }

    let rewritten = rewrite_hook_config(
        &hook_text,
        &hook_path,
        &config.hook_repo,
        &pinned,
        &lock_version,
    )?;
    fs::write(&hook_path, rewritten)?;

    Ok(SyncOutcome::Updated {
        from: pinned,
        to: lock_version,
    })
}
