//! CLI presenter for output formatting

use std::io::{self, Write};

use colored::*;

use crate::application::ports::FlavorEvent;
use crate::domain::DataFlavor;

/// Presenter for CLI output formatting
pub struct Presenter;

impl Presenter {
    pub fn new() -> Self {
        Self
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Output a line to stdout
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Output clipboard text to stdout exactly as stored
    pub fn output_inline(&self, text: &str) {
        print!("{}", text);
        let _ = io::stdout().flush();
    }

    /// Print a key-value pair (config list, status)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }

    /// Print one flavor-change event
    pub fn flavor_event(&self, event: &FlavorEvent) {
        println!("{} {}", event.clipboard.cyan(), format_flavors(&event.flavors));
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}

/// Render a flavor set for display, `(none)` when empty
pub fn format_flavors(flavors: &[DataFlavor]) -> String {
    if flavors.is_empty() {
        return "(none)".to_string();
    }
    flavors
        .iter()
        .map(DataFlavor::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
