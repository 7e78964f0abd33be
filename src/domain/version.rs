//! Version arithmetic on top of `semver::Version`.
//!
//! Every bump clears build metadata. Major/minor/patch bumps also drop any
//! prerelease label; prerelease bumps only touch the label.

use semver::{BuildMetadata, Prerelease, Version};

use crate::error::{BumpkitError, Result};

/// Represents the type of numeric version bump to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionBump {
    Major,
    Minor,
    Patch,
}

/// Parse a version string, mapping failures to a version error that names the input.
pub fn parse_version(text: &str) -> Result<Version> {
    Version::parse(text.trim())
        .map_err(|e| BumpkitError::version(format!("'{}' is not a semantic version: {}", text, e)))
}

/// Bumps a version according to the specified bump type.
///
/// - **Major**: major += 1, minor = 0, patch = 0
/// - **Minor**: minor += 1, patch = 0
/// - **Patch**: patch += 1
pub fn bump_version(version: &Version, bump_type: VersionBump) -> Version {
    let (major, minor, patch) = match bump_type {
        VersionBump::Major => (version.major + 1, 0, 0),
        VersionBump::Minor => (version.major, version.minor + 1, 0),
        VersionBump::Patch => (version.major, version.minor, version.patch + 1),
    };
    Version::new(major, minor, patch)
}

/// Drop the prerelease label and build metadata, keeping major.minor.patch.
pub fn finalize_version(version: &Version) -> Version {
    Version::new(version.major, version.minor, version.patch)
}

/// Increment the prerelease counter.
///
/// The last numeric identifier of the label is incremented (`beta.1` ->
/// `beta.2`, `rc.1.dev` -> `rc.2.dev`). A label without a numeric identifier
/// gets `.1` appended. A version without a label starts at `<token>.1`.
pub fn bump_prerelease(version: &Version, token: &str) -> Result<Version> {
    let label = if version.pre.is_empty() {
        format!("{}.1", token)
    } else {
        increment_label(version.pre.as_str())
    };

    let mut next = version.clone();
    next.pre = Prerelease::new(&label)?;
    next.build = BuildMetadata::EMPTY;
    Ok(next)
}

fn increment_label(label: &str) -> String {
    let mut parts: Vec<String> = label.split('.').map(str::to_string).collect();

    let last_numeric = parts
        .iter()
        .rposition(|part| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit()));

    match last_numeric.and_then(|i| parts[i].parse::<u64>().ok().map(|n| (i, n))) {
        Some((i, n)) => {
            parts[i] = (n + 1).to_string();
            parts.join(".")
        }
        None => format!("{}.1", label),
    }
}

/// Whether the version carries a prerelease label.
pub fn is_prerelease(version: &Version) -> bool {
    !version.pre.is_empty()
}
