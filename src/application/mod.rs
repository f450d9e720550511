//! Application layer - Clipboard facade and port interfaces
//!
//! Contains the facade operations and the trait definitions
//! for the native clipboard and configuration storage.

pub mod ports;
pub mod system_clipboard;

pub use system_clipboard::SystemClipboard;
