use semver::Version;

use crate::domain::version::{
    bump_prerelease, bump_version, finalize_version, is_prerelease, parse_version, VersionBump,
};
use crate::error::{BumpkitError, Result};

/// Candidate next versions keyed by a short mnemonic, in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct VersionSuggestions {
    current: Version,
    candidates: Vec<(&'static str, Version)>,
    default: Version,
}

impl VersionSuggestions {
    /// Derive the candidates for a current version.
    ///
    /// Prerelease versions get `r` (release) and `b` (next prerelease).
    /// Release versions get `M`, `m`, `p` and their `b`-prefixed prerelease
    /// variants labelled with `token`.
    pub fn for_version(current: &Version, token: &str) -> Result<Self> {
        let (candidates, default) = if is_prerelease(current) {
            let next_pre = bump_prerelease(current, token)?;
            (
                vec![("r", finalize_version(current)), ("b", next_pre.clone())],
                next_pre,
            )
        } else {
            let major = bump_version(current, VersionBump::Major);
            let minor = bump_version(current, VersionBump::Minor);
            let patch = bump_version(current, VersionBump::Patch);
            let candidates = vec![
                ("M", major.clone()),
                ("m", minor.clone()),
                ("p", patch.clone()),
                ("bM", bump_prerelease(&major, token)?),
                ("bm", bump_prerelease(&minor, token)?),
                ("bp", bump_prerelease(&patch, token)?),
            ];
            (candidates, patch)
        };

        Ok(VersionSuggestions {
            current: current.clone(),
            candidates,
            default,
        })
    }

    pub fn current(&self) -> &Version {
        &self.current
    }

    pub fn default_version(&self) -> &Version {
        &self.default
    }

    pub fn candidates(&self) -> &[(&'static str, Version)] {
        &self.candidates
    }

    /// Resolve the operator's answer to a version.
    ///
    /// Empty input picks the default, then keys, then 1-based indices are
    /// tried, and anything else must parse as a version.
    pub fn resolve(&self, input: &str) -> Result<Version> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(self.default.clone());
        }

        if let Some((_, version)) = self.candidates.iter().find(|(key, _)| *key == input) {
            return Ok(version.clone());
        }

        if input.bytes().all(|b| b.is_ascii_digit()) {
            let index: usize = input
                .parse()
                .map_err(|_| BumpkitError::selection(format!("'{}' is not an index", input)))?;
            return index
                .checked_sub(1)
                .and_then(|i| self.candidates.get(i))
                .map(|(_, version)| version.clone())
                .ok_or_else(|| {
                    BumpkitError::selection(format!(
                        "index {} is out of range 1-{}",
                        index,
                        self.candidates.len()
                    ))
                });
        }

        parse_version(input)
    }
}
