//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::domain::DataFlavor;

/// sysclip - copy, inspect and clear the desktop clipboard
#[derive(Parser, Debug)]
#[command(name = "sysclip")]
#[command(version)]
#[command(about = "Copy text, file lists and images to the desktop clipboard, inspect and clear it")]
#[command(long_about = None)]
pub struct Cli {
    /// Log filter (off, error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Put content on the clipboard
    Copy {
        #[command(subcommand)]
        target: CopyTarget,
    },
    /// Print clipboard content
    Paste(PasteArgs),
    /// Clear the clipboard
    Clear,
    /// Show clipboard name, emptiness and available flavors
    Status {
        /// Exit with status 1 unless this flavor (text, file-list, image) is present
        #[arg(long, value_name = "FLAVOR")]
        has: Option<DataFlavor>,
    },
    /// Print flavor changes until Ctrl-C
    Watch,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// What to copy
#[derive(Subcommand, Debug)]
pub enum CopyTarget {
    /// Copy a string (read from stdin when omitted)
    Text {
        text: Option<String>,
    },
    /// Copy a list of files
    Files {
        #[arg(required = true, value_name = "PATH")]
        paths: Vec<PathBuf>,
    },
    /// Copy a PNG image
    Image {
        #[arg(value_name = "PNG")]
        path: PathBuf,
    },
}

/// Options for `paste`
#[derive(Args, Debug)]
pub struct PasteArgs {
    /// Shape to read the clipboard as
    #[arg(long = "as", value_enum, default_value_t = PasteAs::Text)]
    pub shape: PasteAs,

    /// Delimiter placed between file names
    #[arg(short, long, value_name = "DELIM")]
    pub delimiter: Option<String>,

    /// Write an image paste to this PNG file
    #[arg(short, long, value_name = "PNG")]
    pub output: Option<PathBuf>,
}

/// Paste shape for clap ValueEnum
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum PasteAs {
    /// String, or file names when no string is present
    Text,
    /// String only
    String,
    /// File list only
    Files,
    /// Image only (requires --output)
    Image,
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &["delimiter", "log_level"];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_copy_text() {
        let cli = Cli::parse_from(["sysclip", "copy", "text", "hello"]);
        match cli.command {
            Commands::Copy {
                target: CopyTarget::Text { text },
            } => assert_eq!(text, Some("hello".to_string())),
            other => panic!("Expected copy text, got {:?}", other),
        }
    }

    #[test]
    fn cli_parses_copy_text_from_stdin() {
        let cli = Cli::parse_from(["sysclip", "copy", "text"]);
        assert!(matches!(
            cli.command,
            Commands::Copy {
                target: CopyTarget::Text { text: None }
            }
        ));
    }

    #[test]
    fn cli_parses_copy_files() {
        let cli = Cli::parse_from(["sysclip", "copy", "files", "a.txt", "b.txt"]);
        if let Commands::Copy {
            target: CopyTarget::Files { paths },
        } = cli.command
        {
            assert_eq!(paths, vec![PathBuf::from("a.txt"), PathBuf::from("b.txt")]);
        } else {
            panic!("Expected copy files command");
        }
    }

    #[test]
    fn cli_requires_at_least_one_file() {
        assert!(Cli::try_parse_from(["sysclip", "copy", "files"]).is_err());
    }

    #[test]
    fn cli_parses_paste_defaults() {
        let cli = Cli::parse_from(["sysclip", "paste"]);
        if let Commands::Paste(args) = cli.command {
            assert_eq!(args.shape, PasteAs::Text);
            assert!(args.delimiter.is_none());
            assert!(args.output.is_none());
        } else {
            panic!("Expected paste command");
        }
    }

    #[test]
    fn cli_parses_paste_files_with_delimiter() {
        let cli = Cli::parse_from(["sysclip", "paste", "--as", "files", "-d", ","]);
        if let Commands::Paste(args) = cli.command {
            assert_eq!(args.shape, PasteAs::Files);
            assert_eq!(args.delimiter, Some(",".to_string()));
        } else {
            panic!("Expected paste command");
        }
    }

    #[test]
    fn cli_rejects_unknown_paste_shape() {
        assert!(Cli::try_parse_from(["sysclip", "paste", "--as", "html"]).is_err());
    }

    #[test]
    fn cli_parses_global_log_level() {
        let cli = Cli::parse_from(["sysclip", "status", "--log-level", "debug"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
        assert!(matches!(cli.command, Commands::Status { has: None }));
    }

    #[test]
    fn cli_parses_status_flavor_alias() {
        let cli = Cli::parse_from(["sysclip", "status", "--has", "files"]);
        assert!(matches!(
            cli.command,
            Commands::Status {
                has: Some(DataFlavor::FileList)
            }
        ));
    }

    #[test]
    fn cli_rejects_unknown_status_flavor() {
        let err = Cli::try_parse_from(["sysclip", "status", "--has", "html"]).unwrap_err();
        assert!(err.to_string().contains("Valid flavors are"));
    }

    #[test]
    fn cli_parses_config_set() {
        let cli = Cli::parse_from(["sysclip", "config", "set", "delimiter", ","]);
        if let Commands::Config {
            action: ConfigAction::Set { key, value },
        } = cli.command
        {
            assert_eq!(key, "delimiter");
            assert_eq!(value, ",");
        } else {
            panic!("Expected Config Set command");
        }
    }

    #[test]
    fn valid_config_keys() {
        assert!(is_valid_config_key("delimiter"));
        assert!(is_valid_config_key("log_level"));
        assert!(!is_valid_config_key("api_key"));
    }

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }
}
