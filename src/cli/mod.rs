//! CLI layer - Command-line interface
//!
//! Argument parsing, output formatting and the command runners.

pub mod app;
pub mod args;
pub mod config_cmd;
pub mod presenter;

pub use app::{run_command, EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE_ERROR};
pub use args::{Cli, Commands, ConfigAction, CopyTarget, PasteArgs, PasteAs};
pub use presenter::Presenter;
