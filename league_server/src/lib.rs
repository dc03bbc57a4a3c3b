//! League Server - Core Library
//!
//! Tracks player wins and serves them over HTTP, backed either by a JSON
//! snapshot file or by an in-memory map.

pub mod cli;
pub mod middleware;
pub mod play;
pub mod server;
pub mod settings;
pub mod store;
pub mod telemetry;

pub use store::{PlayerStore, StoreError};
