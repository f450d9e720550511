//! Clipboard adapters
//!
//! `DesktopClipboard` talks to the OS clipboard; `InMemoryClipboard` keeps
//! content inside the process.

mod desktop;
mod memory;
mod png;

pub use desktop::DesktopClipboard;
pub use memory::InMemoryClipboard;
pub use png::{decode_png, encode_png, ImageCodecError};

use tracing::warn;

use crate::application::ports::NativeClipboard;

/// Create the clipboard adapter for the current session.
///
/// Falls back to a process-local clipboard when the desktop one cannot be
/// reached (headless sessions, missing display).
pub fn create_clipboard() -> Box<dyn NativeClipboard> {
    let desktop = DesktopClipboard::new();
    match desktop.check_access() {
        Ok(()) => Box::new(desktop),
        Err(e) => {
            warn!(error = %e, "desktop clipboard unavailable, using in-memory clipboard");
            Box::new(InMemoryClipboard::new())
        }
    }
}
