//! sysclip - desktop clipboard facade
//!
//! Copy text, file lists and images to the system clipboard, ask what it
//! currently holds, read it back in a requested shape, watch it for changes
//! and clear it.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Flavors, payloads, transferable content and errors
//! - **Application**: The `SystemClipboard` facade and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (desktop and in-memory clipboards, config, logging)
//! - **CLI**: Command-line interface and argument parsing

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
