//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod clipboard;
pub mod config;

// Re-export common types
pub use clipboard::{ClipboardOwner, FlavorEvent, FlavorListener, NativeClipboard};
pub use config::ConfigStore;
