use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::VersionOccurrence;
use crate::error::{BumpkitError, Result};

/// File name looked up in the project root and in the user config directory.
pub const CONFIG_FILE_NAME: &str = "bumpkit.toml";

/// Represents the complete configuration for bumpkit.
///
/// Contains the version bump settings and the lint hook sync settings.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub bump: BumpConfig,

    #[serde(default)]
    pub sync: SyncConfig,
}

/// One place in the project where the release version is written down.
///
/// `pattern` is a regular expression whose named group `version` captures
/// the version string. `count` is how many matches the file must contain.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct OccurrenceConfig {
    pub file: PathBuf,
    pub pattern: String,
    #[serde(default = "default_count")]
    pub count: usize,
}

fn default_count() -> usize {
    1
}

fn default_occurrences() -> Vec<OccurrenceConfig> {
    vec![OccurrenceConfig {
        file: PathBuf::from("pyproject.toml"),
        pattern: r#"version = "(?P<version>[^"\s]+)""#.to_string(),
        count: 1,
    }]
}

fn default_main_branch() -> String {
    "main".to_string()
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_commit_message() -> String {
    "build: bump version to {version}".to_string()
}

fn default_tag_message() -> String {
    "bump version to {version}".to_string()
}

fn default_prerelease_token() -> String {
    "beta".to_string()
}

/// Configuration for the version bumper.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BumpConfig {
    #[serde(default = "default_occurrences")]
    pub occurrences: Vec<OccurrenceConfig>,

    #[serde(default = "default_main_branch")]
    pub main_branch: String,

    #[serde(default = "default_remote")]
    pub remote: String,

    /// Commit message template, `{version}` is replaced with the new version.
    #[serde(default = "default_commit_message")]
    pub commit_message: String,

    /// Annotated tag message template.
    #[serde(default = "default_tag_message")]
    pub tag_message: String,

    /// Prerelease label attached to the `bM`/`bm`/`bp` suggestions.
    #[serde(default = "default_prerelease_token")]
    pub prerelease_token: String,

    #[serde(default)]
    pub lockfile: LockfileConfig,
}

impl Default for BumpConfig {
    fn default() -> Self {
        BumpConfig {
            occurrences: default_occurrences(),
            main_branch: default_main_branch(),
            remote: default_remote(),
            commit_message: default_commit_message(),
            tag_message: default_tag_message(),
            prerelease_token: default_prerelease_token(),
            lockfile: LockfileConfig::default(),
        }
    }
}

impl BumpConfig {
    /// Render the commit message for a version.
    pub fn commit_message_for(&self, version: &semver::Version) -> String {
        self.commit_message
            .replace("{version}", &version.to_string())
    }

    /// Render the annotated tag message for a version.
    pub fn tag_message_for(&self, version: &semver::Version) -> String {
        self.tag_message.replace("{version}", &version.to_string())
    }
}

fn default_lock_path() -> PathBuf {
    PathBuf::from("uv.lock")
}

fn default_lock_command() -> Vec<String> {
    vec!["uv".to_string(), "lock".to_string()]
}

fn default_true() -> bool {
    true
}

/// Lock artifact regenerated after the version files are rewritten.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LockfileConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_lock_path")]
    pub path: PathBuf,

    #[serde(default = "default_lock_command")]
    pub command: Vec<String>,
}

impl Default for LockfileConfig {
    fn default() -> Self {
        LockfileConfig {
            enabled: true,
            path: default_lock_path(),
            command: default_lock_command(),
        }
    }
}

fn default_sync_lock_file() -> PathBuf {
    PathBuf::from("uv.lock")
}

fn default_hook_config() -> PathBuf {
    PathBuf::from(".pre-commit-config.yaml")
}

fn default_package() -> String {
    "ruff".to_string()
}

fn default_hook_repo() -> String {
    "https://github.com/astral-sh/ruff-pre-commit".to_string()
}

/// Configuration for the lint hook syncer.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SyncConfig {
    #[serde(default = "default_sync_lock_file")]
    pub lock_file: PathBuf,

    #[serde(default = "default_hook_config")]
    pub hook_config: PathBuf,

    /// Package name looked up in the lock document.
    #[serde(default = "default_package")]
    pub package: String,

    /// Hook source URL looked up in the hook configuration.
    #[serde(default = "default_hook_repo")]
    pub hook_repo: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        SyncConfig {
            lock_file: default_sync_lock_file(),
            hook_config: default_hook_config(),
            package: default_package(),
            hook_repo: default_hook_repo(),
        }
    }
}

impl Config {
    /// Checks settings that serde cannot express.
    ///
    /// Every occurrence pattern must compile and expose a `version` group,
    /// and an enabled lock refresh needs a command to run.
    pub fn validate(&self) -> Result<()> {
        if self.bump.occurrences.is_empty() {
            return Err(BumpkitError::config("no version occurrences configured"));
        }

        for occurrence in &self.bump.occurrences {
            VersionOccurrence::from_config(occurrence)?;
        }

        if self.bump.lockfile.enabled && self.bump.lockfile.command.is_empty() {
            return Err(BumpkitError::config(
                "lockfile refresh is enabled but no command is set",
            ));
        }

        Ok(())
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `bumpkit.toml` in the project root
/// 3. `bumpkit.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// The loaded configuration is validated before it is returned.
pub fn load_config(config_path: Option<&Path>, root: &Path) -> Result<Config> {
    let local = root.join(CONFIG_FILE_NAME);

    let source = if let Some(path) = config_path {
        Some(path.to_path_buf())
    } else if local.exists() {
        Some(local)
    } else {
        dirs::config_dir()
            .map(|dir| dir.join(CONFIG_FILE_NAME))
            .filter(|path| path.exists())
    };

    let config = match source {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading configuration");
            let config_str = fs::read_to_string(&path)?;
            toml::from_str(&config_str).map_err(|source| BumpkitError::Toml { path, source })?
        }
        None => Config::default(),
    };

    config.validate()?;
    Ok(config)
}
