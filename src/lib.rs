//! NiFi Notify Library
//!
//! Turns a Blaise upload notification into a NiFi manifest: the file is
//! classified from its name alone, described in a versioned manifest and
//! published to Pub/Sub, with progress recorded in the data delivery status
//! service.

pub mod app;
pub mod cli;
pub mod config;
pub mod constants;
pub mod errors;
pub mod prelude;

// Re-export commonly used types for convenience
pub use errors::{AppError, Result};
