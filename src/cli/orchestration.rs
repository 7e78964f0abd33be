//! Main workflow orchestration logic
//!
//! The version bump as a sequence of steps over injected collaborators:
//! a [Repository] for version control, a [Prompter] for every operator
//! decision, and a [LockRefresher] for the lock artifact. The binary wires in
//! the real implementations; tests wire in mocks.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use semver::Version;
use tracing::{debug, warn};

use crate::config::BumpConfig;
use crate::domain::{is_prerelease, parse_version, VersionOccurrence, VersionSuggestions};
use crate::error::{BumpkitError, Result};
use crate::git::{MergeOutcome, Repository};
use crate::lockfile::LockRefresher;
use crate::ui::{self, Prompter};
use crate::warning::{BumpWarning, Warnings};

/// Result of a bump workflow run
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowResult {
    /// The operator declined a gate before any file was touched
    Cancelled,
    /// The version files were rewritten
    Bumped(BumpSummary),
}

/// What a completed bump did
#[derive(Debug, Clone, PartialEq)]
pub struct BumpSummary {
    pub previous: Version,
    pub version: Version,
    /// Files rewritten, relative to the project root
    pub files: Vec<PathBuf>,
    pub committed: bool,
    pub pushed: bool,
    pub warnings: usize,
}

/// Compile the configured occurrences.
pub fn occurrences_from_config(config: &BumpConfig) -> Result<Vec<VersionOccurrence>> {
    config
        .occurrences
        .iter()
        .map(VersionOccurrence::from_config)
        .collect()
}

fn read_required(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(BumpkitError::MissingFile(path.to_path_buf()));
    }
    Ok(fs::read_to_string(path)?)
}

/// Find the current version across all occurrences.
///
/// Count mismatches and disagreeing files raise warnings. When files
/// disagree, the highest version wins.
pub fn discover_current_version(
    root: &Path,
    occurrences: &[VersionOccurrence],
    warnings: &mut Warnings,
) -> Result<Version> {
    let mut found = BTreeSet::new();

    for occurrence in occurrences {
        let text = read_required(&occurrence.path_in(root))?;
        let versions = occurrence.find_versions(&text);
        debug!(file = %occurrence.file.display(), ?versions, "scanned");

        if versions.len() != occurrence.expected {
            warnings.raise(BumpWarning::OccurrenceMismatch {
                file: occurrence.file.clone(),
                expected: occurrence.expected,
                found: versions.len(),
            });
        }
        found.extend(versions.into_iter().map(str::to_string));
    }

    let parsed = found
        .iter()
        .map(|text| parse_version(text))
        .collect::<Result<Vec<_>>>()?;

    // Build metadata does not take part in precedence.
    let current = parsed
        .into_iter()
        .max_by(|a, b| a.cmp_precedence(b))
        .ok_or_else(|| {
            BumpkitError::version("no version string found in the configured files")
        })?;

    if found.len() > 1 {
        warnings.raise(BumpWarning::MultipleVersions {
            versions: found.into_iter().collect(),
            chosen: current.to_string(),
        });
    }

    Ok(current)
}

/// Rewrite every occurrence to `version`, returning the touched files.
pub fn apply_version(
    root: &Path,
    occurrences: &[VersionOccurrence],
    version: &Version,
) -> Result<Vec<PathBuf>> {
    let new_version = version.to_string();
    let mut files: Vec<PathBuf> = Vec::new();

    // Several patterns may target the same file, so each pass re-reads it.
    for occurrence in occurrences {
        let path = occurrence.path_in(root);
        let text = read_required(&path)?;
        fs::write(&path, occurrence.replace_versions(&text, &new_version))?;

        if !files.contains(&occurrence.file) {
            files.push(occurrence.file.clone());
        }
    }

    Ok(files)
}

fn choose_next_version(
    suggestions: &VersionSuggestions,
    prompter: &mut dyn Prompter,
) -> Result<Version> {
    ui::display_suggestions(suggestions);
    let answer = prompter.ask(&format!(
        "Default version: {} [Enter to confirm] or enter a new version: ",
        suggestions.default_version()
    ))?;
    suggestions.resolve(&answer)
}

/// Main version bump workflow
///
/// 1. Discover the current version
/// 2. Offer next versions and read the choice
/// 3. Gate on non-increasing versions and a dirty working tree
/// 4. Rewrite the version files and refresh the lock artifact
/// 5. Gate on collected warnings
/// 6. Optionally commit, tag, fast-forward the main line and push
pub fn run_bump_workflow(
    root: &Path,
    config: &BumpConfig,
    repo: &dyn Repository,
    prompter: &mut dyn Prompter,
    refresher: &dyn LockRefresher,
) -> Result<WorkflowResult> {
    let occurrences = occurrences_from_config(config)?;
    let mut warnings = Warnings::new();

    let current = discover_current_version(root, &occurrences, &mut warnings)?;
    let suggestions = VersionSuggestions::for_version(&current, &config.prerelease_token)?;
    let next = choose_next_version(&suggestions, prompter)?;
    ui::display_version_change(&current, &next);

    if next.cmp_precedence(&current) != Ordering::Greater {
        warnings.raise(BumpWarning::NotIncreasing {
            current: current.to_string(),
            next: next.to_string(),
        });
        if !prompter.acknowledge("The new version does not increase.")? {
            println!("Operation cancelled by user.");
            return Ok(WorkflowResult::Cancelled);
        }
    }

    if repo.is_dirty()? {
        ui::display_warning(&BumpWarning::DirtyWorkingTree);
        if !prompter.acknowledge("Uncommitted changes are present.")? {
            println!("Operation cancelled by user.");
            return Ok(WorkflowResult::Cancelled);
        }
    }

    let files = apply_version(root, &occurrences, &next)?;
    ui::display_success(&format!("Updated {} file(s) to {}", files.len(), next));

    if let Err(e) = refresher.refresh() {
        warn!(error = %e, "lock refresh failed");
        ui::display_status(&format!("Lock refresh failed, continuing: {}", e));
    }

    let mut summary = BumpSummary {
        previous: current,
        version: next,
        files,
        committed: false,
        pushed: false,
        warnings: 0,
    };

    if !warnings.is_empty()
        && !prompter.acknowledge(&format!(
            "There were {} warning(s), please check the output before continuing.",
            warnings.len()
        ))?
    {
        summary.warnings = warnings.len();
        return Ok(WorkflowResult::Bumped(summary));
    }

    if prompter.confirm("Do you want to commit the changes?")? {
        publish(root, config, repo, prompter, refresher, &mut summary, &mut warnings)?;
    }

    summary.warnings = warnings.len();
    Ok(WorkflowResult::Bumped(summary))
}

fn publish(
    root: &Path,
    config: &BumpConfig,
    repo: &dyn Repository,
    prompter: &mut dyn Prompter,
    refresher: &dyn LockRefresher,
    summary: &mut BumpSummary,
    warnings: &mut Warnings,
) -> Result<()> {
    let version = summary.version.clone();
    let tag = format!("v{}", version);

    let mut paths = summary.files.clone();
    if let Some(artifact) = refresher.artifact().filter(|a| root.join(a).is_file()) {
        paths.push(artifact.to_path_buf());
    }
    repo.stage(&paths)?;
    repo.commit(&config.commit_message_for(&version))?;
    repo.create_annotated_tag(&tag, &config.tag_message_for(&version))?;
    summary.committed = true;
    ui::display_success(&format!("Changes committed and created tag {}", tag));

    let release = !is_prerelease(&version);
    let branch = repo.current_branch()?;

    if release && branch != config.main_branch {
        merge_into_main(repo, &branch, &config.main_branch, warnings)?;
    }

    if prompter.confirm("Do you want to push the changes?")? {
        repo.push(&config.remote, &branch, &[tag.as_str()])?;
        if release && branch != config.main_branch {
            repo.push(&config.remote, &config.main_branch, &[])?;
        }
        summary.pushed = true;
        ui::display_success("Changes pushed");
    }

    Ok(())
}

/// Fast-forward `main` to `branch`, always returning to `branch` afterwards.
fn merge_into_main(
    repo: &dyn Repository,
    branch: &str,
    main: &str,
    warnings: &mut Warnings,
) -> Result<()> {
    repo.checkout(main)?;
    let merged = repo.merge_fast_forward(branch);
    let restored = repo.checkout(branch);

    match merged? {
        MergeOutcome::NotFastForward => warnings.raise(BumpWarning::MergeNotFastForward {
            branch: branch.to_string(),
            main: main.to_string(),
        }),
        outcome => {
            debug!(?outcome, branch, main, "merged into main line");
            ui::display_success(&format!("Merged {} into {}", branch, main));
        }
    }
    restored
}
