//! Confirmation and warning prompts shown around destructive or rejected
//! operations.

use std::io::{self, BufRead, Write};

/// User-facing prompts.
pub trait Prompter {
    /// Ask a yes/no question; `true` means go ahead.
    fn confirm(&self, message: &str) -> bool;

    /// Show a warning that blocks until acknowledged by the front end.
    fn warn(&self, message: &str);
}

/// Whether a typed answer means yes.
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Prompts on the terminal: questions on stderr, answers from stdin.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdioPrompter {
    assume_yes: bool,
}

impl StdioPrompter {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl Prompter for StdioPrompter {
    fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        let mut stderr = io::stderr();
        if write!(stderr, "{message} [y/N] ").and_then(|_| stderr.flush()).is_err() {
            return false;
        }

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => is_affirmative(&answer),
            Err(err) => {
                tracing::warn!(error = %err, "Could not read confirmation");
                false
            }
        }
    }

    fn warn(&self, message: &str) {
        eprintln!("warning: {message}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn affirmative_answers() {
        assert!(is_affirmative("y"));
        assert!(is_affirmative(" YES \n"));
        assert!(!is_affirmative(""));
        assert!(!is_affirmative("no"));
        assert!(!is_affirmative("yep"));
    }

    #[test]
    fn assume_yes_skips_the_question() {
        assert!(StdioPrompter::new(true).confirm("Delete everything?"));
    }
}
