//! User interface module - interaction (prompts) and formatting.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - Confirmation gates and user input handling
//!
//! Workflow code never reads stdin directly. It asks a [Prompter], so the
//! same decisions can come from the terminal, from `--yes`, or from a test
//! script.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use crate::error::Result;

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_error, display_status, display_success, display_suggestions,
    display_version_change, display_warning, format_suggestions,
};

/// Source of operator decisions.
pub trait Prompter {
    /// Ask a free-form question and return the trimmed answer.
    fn ask(&mut self, prompt: &str) -> Result<String>;

    /// Yes/no question that defaults to no.
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        let answer = self.ask(&format!("{} [y/N] ", prompt))?;
        Ok(is_yes(&answer))
    }

    /// Acknowledge a warning before going on. Defaults to continue;
    /// answering `n`/`no` declines.
    fn acknowledge(&mut self, message: &str) -> Result<bool> {
        let answer = self.ask(&format!("{} Press Enter to continue or 'n' to abort: ", message))?;
        Ok(!is_no(&answer))
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

fn is_no(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "n" | "no")
}

/// Reads answers from stdin, prompting on stdout.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn ask(&mut self, prompt: &str) -> Result<String> {
        print!("{}", prompt);
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().lock().read_line(&mut input)?;
        Ok(input.trim().to_string())
    }
}

/// Accepts every default and approves every gate, for non-interactive runs.
#[derive(Debug, Default)]
pub struct AutoApprove;

impl Prompter for AutoApprove {
    fn ask(&mut self, prompt: &str) -> Result<String> {
        println!("{}", prompt);
        Ok(String::new())
    }

    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        println!("{} [y/N] y", prompt);
        Ok(true)
    }

    fn acknowledge(&mut self, message: &str) -> Result<bool> {
        println!("{} (auto-approved)", message);
        Ok(true)
    }
}

/// Replays a fixed list of answers; runs out into empty answers.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    asked: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScriptedPrompter {
            answers: answers.into_iter().map(Into::into).collect(),
            asked: Vec::new(),
        }
    }

    /// Prompts shown so far.
    pub fn asked(&self) -> &[String] {
        &self.asked
    }

    /// Answers not consumed yet.
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&mut self, prompt: &str) -> Result<String> {
        self.asked.push(prompt.to_string());
        Ok(self.answers.pop_front().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirm_defaults_to_no() {
        let mut prompter = ScriptedPrompter::new([""]);
        assert!(!prompter.confirm("Commit?").unwrap());
    }

    #[test]
    fn test_confirm_accepts_yes_variants() {
        let mut prompter = ScriptedPrompter::new(["y", "YES", "Yes ", "nope"]);
        assert!(prompter.confirm("a").unwrap());
        assert!(prompter.confirm("b").unwrap());
        assert!(prompter.confirm("c").unwrap());
        assert!(!prompter.confirm("d").unwrap());
    }

    #[test]
    fn test_acknowledge_defaults_to_continue() {
        let mut prompter = ScriptedPrompter::new(["", "n", "No"]);
        assert!(prompter.acknowledge("warned").unwrap());
        assert!(!prompter.acknowledge("warned").unwrap());
        assert!(!prompter.acknowledge("warned").unwrap());
    }

    #[test]
    fn test_scripted_records_prompts() {
        let mut prompter = ScriptedPrompter::new(["1.2.4"]);
        assert_eq!(prompter.ask("Version: ").unwrap(), "1.2.4");
        assert_eq!(prompter.ask("Again: ").unwrap(), "");
        assert_eq!(prompter.asked(), &["Version: ".to_string(), "Again: ".to_string()]);
        assert_eq!(prompter.remaining(), 0);
    }

    #[test]
    fn test_auto_approve() {
        let mut prompter = AutoApprove;
        assert_eq!(prompter.ask("Version: ").unwrap(), "");
        assert!(prompter.confirm("Push?").unwrap());
        assert!(prompter.acknowledge("warned").unwrap());
    }
}
