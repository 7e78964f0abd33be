use std::fmt;
use std::path::PathBuf;

/// Non-fatal conditions raised during a version bump.
/// These are reported to the user and must be acknowledged before committing.
#[derive(Debug, Clone, PartialEq)]
pub enum BumpWarning {
    /// A version file matched its pattern a different number of times than configured
    OccurrenceMismatch {
        file: PathBuf,
        expected: usize,
        found: usize,
    },
    /// The configured files disagree on the current version
    MultipleVersions { versions: Vec<String>, chosen: String },
    /// The chosen version does not sort after the current one
    NotIncreasing { current: String, next: String },
    /// Tracked files have uncommitted changes
    DirtyWorkingTree,
    /// The release branch could not be fast-forwarded into the main line
    MergeNotFastForward { branch: String, main: String },
}

impl fmt::Display for BumpWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BumpWarning::OccurrenceMismatch {
                file,
                expected,
                found,
            } => write!(
                f,
                "version occurrence mismatch in {}: expected {}, found {}",
                file.display(),
                expected,
                found
            ),
            BumpWarning::MultipleVersions { versions, chosen } => write!(
                f,
                "multiple versions found: {}; using {}",
                versions.join(", "),
                chosen
            ),
            BumpWarning::NotIncreasing { current, next } => write!(
                f,
                "new version {} should be greater than current version {}",
                next, current
            ),
            BumpWarning::DirtyWorkingTree => write!(
                f,
                "repo is dirty, please commit or stage changes before continuing"
            ),
            BumpWarning::MergeNotFastForward { branch, main } => write!(
                f,
                "merge {} into {} failed, please merge manually",
                branch, main
            ),
        }
    }
}

/// Warnings collected over one run.
#[derive(Debug, Default, Clone)]
pub struct Warnings {
    items: Vec<BumpWarning>,
}

impl Warnings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a warning and print it.
    pub fn raise(&mut self, warning: BumpWarning) {
        crate::ui::display_warning(&warning);
        self.items.push(warning);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}
