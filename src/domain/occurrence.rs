use std::path::{Path, PathBuf};

use regex::Regex;

use crate::config::OccurrenceConfig;
use crate::error::{BumpkitError, Result};

/// Name of the capture group holding the version string.
pub const VERSION_GROUP: &str = "version";

/// A file location where the project version is written, with its compiled pattern.
#[derive(Debug, Clone)]
pub struct VersionOccurrence {
    pub file: PathBuf,
    pub pattern: Regex,
    pub expected: usize,
}

impl VersionOccurrence {
    pub fn new(file: impl Into<PathBuf>, pattern: &str, expected: usize) -> Result<Self> {
        let file = file.into();
        let pattern = Regex::new(pattern).map_err(|e| {
            BumpkitError::config(format!("invalid pattern for {}: {}", file.display(), e))
        })?;
        if !pattern
            .capture_names()
            .flatten()
            .any(|name| name == VERSION_GROUP)
        {
            return Err(BumpkitError::config(format!(
                "pattern '{}' for {} has no (?P<{}>...) group",
                pattern,
                file.display(),
                VERSION_GROUP
            )));
        }

        Ok(VersionOccurrence {
            file,
            pattern,
            expected,
        })
    }

    pub fn from_config(config: &OccurrenceConfig) -> Result<Self> {
        Self::new(config.file.clone(), &config.pattern, config.count)
    }

    /// Path of the file below the project root.
    pub fn path_in(&self, root: &Path) -> PathBuf {
        root.join(&self.file)
    }

    /// Every version string captured in `text`, in document order.
    pub fn find_versions<'t>(&self, text: &'t str) -> Vec<&'t str> {
        self.pattern
            .captures_iter(text)
            .filter_map(|caps| caps.name(VERSION_GROUP))
            .map(|m| m.as_str())
            .collect()
    }

    /// Replace the captured version of every match with `new_version`.
    ///
    /// Only the bytes of the `version` group change; the rest of each match
    /// and the text around it are copied verbatim.
    pub fn replace_versions(&self, text: &str, new_version: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut last = 0;

        for caps in self.pattern.captures_iter(text) {
            if let Some(m) = caps.name(VERSION_GROUP) {
                out.push_str(&text[last..m.start()]);
                out.push_str(new_version);
                last = m.end();
            }
        }

        out.push_str(&text[last..]);
        out
    }
}
