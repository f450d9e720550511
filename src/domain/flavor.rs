//! Payload flavor value object

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Platform line separator, the default delimiter for rendering file lists
#[cfg(windows)]
pub const LINE_SEPARATOR: &str = "\r\n";

/// Platform line separator, the default delimiter for rendering file lists
#[cfg(not(windows))]
pub const LINE_SEPARATOR: &str = "\n";

/// All flavors this crate produces and consumes, in text-priority order
pub const ALL_FLAVORS: &[DataFlavor] = &[DataFlavor::Text, DataFlavor::FileList, DataFlavor::Image];

/// Content shape carried by the clipboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum DataFlavor {
    /// Plain unicode string
    Text,
    /// Ordered list of file paths
    FileList,
    /// Decoded in-memory raster
    Image,
}

impl DataFlavor {
    /// Get the string identifier for this flavor
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::FileList => "file-list",
            Self::Image => "image",
        }
    }
}

/// Error when parsing an unknown flavor name
#[derive(Debug, Clone, Error)]
#[error("Invalid flavor: \"{input}\". Valid flavors are: {}", flavor_names())]
pub struct InvalidFlavorError {
    pub input: String,
}

fn flavor_names() -> String {
    ALL_FLAVORS
        .iter()
        .map(DataFlavor::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

impl FromStr for DataFlavor {
    type Err = InvalidFlavorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" | "string" => Ok(Self::Text),
            "file-list" | "files" => Ok(Self::FileList),
            "image" => Ok(Self::Image),
            _ => Err(InvalidFlavorError {
                input: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for DataFlavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
