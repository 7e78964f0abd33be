//! Pure formatting functions for UI output.
//!
//! Everything the tools print to the operator goes through here.

use console::style;
use semver::Version;

use crate::domain::VersionSuggestions;
use crate::warning::BumpWarning;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a bump warning to the user.
pub fn display_warning(warning: &BumpWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Render the candidate list, one `index or key: version` line each.
///
/// Keys are padded so the versions line up.
pub fn format_suggestions(suggestions: &VersionSuggestions) -> String {
    suggestions
        .candidates()
        .iter()
        .enumerate()
        .map(|(i, (key, version))| format!(" {} or {:<4}{}", i + 1, format!("{}:", key), version))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Display the current version and the next-version menu.
pub fn display_suggestions(suggestions: &VersionSuggestions) {
    println!(
        "\n{} {}",
        style("Current version:").bold(),
        suggestions.current()
    );
    println!("{}", style("Possible next versions:").underlined());
    println!("{}", format_suggestions(suggestions));
}

/// Display the old and new version side by side.
pub fn display_version_change(current: &Version, next: &Version) {
    println!("\n{}", style("Version change:").bold());
    println!("  From: {}", style(current).red());
    println!("  To:   {}", style(next).green());
}
