//! Infrastructure layer - Adapter implementations
//!
//! Concrete implementations of the port interfaces, backed by the OS
//! clipboard, the filesystem and the tracing subscriber.

pub mod clipboard;
pub mod config;
pub mod logging;

pub use clipboard::{create_clipboard, DesktopClipboard, InMemoryClipboard};
pub use config::XdgConfigStore;
pub use logging::init_logging;
