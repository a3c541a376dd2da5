//! Command-line interface components
//!
//! This module contains CLI-specific code for the NiFi Notify application:
//! argument parsing and the command handlers.

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, EventArgs, GlobalArgs, ManifestArgs, NotifyArgs};
pub use commands::{handle_event, handle_manifest, handle_notify};
