//! Domain error types

use thiserror::Error;

use super::flavor::DataFlavor;

/// Clipboard failure taxonomy shared by adapters and the facade
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClipboardError {
    /// The content does not offer the requested flavor
    #[error("Unsupported flavor: {0}")]
    UnsupportedFlavor(DataFlavor),

    /// The native clipboard cannot be accessed right now (e.g. held by another process)
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),

    /// The flavor was advertised but its value could not be materialized
    #[error("Failed to retrieve {flavor} data: {message}")]
    DataRetrieval { flavor: DataFlavor, message: String },
}

impl ClipboardError {
    /// Whether this failure only means "not present in that shape".
    ///
    /// Read accessors turn these into an absent result; everything else
    /// propagates.
    pub fn is_absent(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedFlavor(_) | Self::DataRetrieval { .. }
        )
    }
}

/// Error when an RGBA buffer cannot describe the declared dimensions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageDataError {
    #[error("Invalid image buffer: {actual} bytes does not match {width}x{height} RGBA ({expected} bytes expected)")]
    SizeMismatch {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Image dimensions {width}x{height} are too large to address")]
    TooLarge { width: usize, height: usize },
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_kinds() {
        assert!(ClipboardError::UnsupportedFlavor(DataFlavor::Text).is_absent());
        assert!(ClipboardError::DataRetrieval {
            flavor: DataFlavor::Image,
            message: "conversion failed".into(),
        }
        .is_absent());
        assert!(!ClipboardError::Unavailable("busy".into()).is_absent());
    }

    #[test]
    fn messages_name_the_flavor() {
        let err = ClipboardError::UnsupportedFlavor(DataFlavor::FileList);
        assert_eq!(err.to_string(), "Unsupported flavor: file-list");
    }
}
