//! Rendering of fatal configuration errors.
//!
//! A run either produces a configuration or stops at the first error, so
//! there is one kind of diagnostic: the error line, the values that caused
//! it, and the options that would fix it.

use std::fmt;

const RED_BOLD: &str = "\x1b[1;31m";
const GREEN_BOLD: &str = "\x1b[1;32m";
const RESET: &str = "\x1b[0m";

/// An error message with the facts behind it and ways out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub message: String,
    /// Values involved, one per line.
    pub context: Vec<String>,
    /// Options or environment changes that resolve the error.
    pub suggestions: Vec<String>,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            context: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Render for a terminal. `color` wraps the labels in ANSI bold.
    pub fn format(&self, color: bool) -> String {
        let paint = |code: &str, label: &str| {
            if color {
                format!("{code}{label}{RESET}")
            } else {
                label.to_string()
            }
        };

        let mut out = format!("{}: {}\n", paint(RED_BOLD, "error"), self.message);
        for line in &self.context {
            out.push_str(&format!("  → {}\n", line));
        }

        if !self.suggestions.is_empty() {
            out.push_str(&format!("\n{}: consider:\n", paint(GREEN_BOLD, "help")));
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                out.push_str(&format!("  {}. {}\n", i + 1, suggestion));
            }
        }

        out
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(false))
    }
}

/// Print a diagnostic to stderr.
pub fn emit(diagnostic: &Diagnostic, color: bool) {
    eprint!("{}", diagnostic.format(color));
}
