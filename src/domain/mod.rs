//! Domain logic - pure version rules independent of git and the terminal

pub mod occurrence;
pub mod suggestion;
pub mod version;

pub use occurrence::VersionOccurrence;
pub use suggestion::VersionSuggestions;
pub use version::{
    bump_prerelease, bump_version, finalize_version, is_prerelease, parse_version, VersionBump,
};
