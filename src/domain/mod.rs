//! Domain layer - Clipboard value types
//!
//! Contains flavors, payloads, transferable content and domain errors.
//! This layer has no dependencies on external systems.

pub mod config;
pub mod error;
pub mod flavor;
pub mod payload;
pub mod transferable;

// Re-export common types
pub use config::AppConfig;
pub use error::*;
pub use flavor::{DataFlavor, ALL_FLAVORS, LINE_SEPARATOR};
pub use payload::{FileList, ImageData, TransferData};
pub use transferable::{FileListSelection, ImageSelection, Transferable};
