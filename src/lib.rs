//! Library entry point for the hn crate.
//! This file re-exports key types for use in tests and other crates.

pub mod api;
pub mod app;
pub mod env;
pub mod fs;
pub mod log;
pub mod net;
pub mod server;
pub mod utils;

#[macro_use]
pub mod macros;

pub use utils::*;

/// Default mailbox size for the actors in this crate.
pub const BUFFER_SIZE: usize = 128;
