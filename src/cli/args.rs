//! Command-line argument parsing for NiFi Notify
//!
//! This module defines the CLI structure using clap derive macros: handling a
//! trigger event end to end, previewing the manifest for an event, and
//! synthesising an event for a local file.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// NiFi Notify - Tell NiFi about Blaise uploads
#[derive(Parser, Debug)]
#[command(
    name = "nifi_notify",
    version,
    about = "Publish NiFi manifests for files uploaded to the Blaise NiFi bucket",
    long_about = "Classifies an uploaded file by its name, builds the NiFi manifest for it and publishes
the manifest to Pub/Sub, recording progress with the data delivery status service."
)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all subcommands
#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Very verbose logging (debug level)
    #[arg(long, global = true)]
    pub very_verbose: bool,

    /// Quiet mode - suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file path
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Handle an upload event: classify, publish and record status
    Notify(NotifyArgs),

    /// Print the manifest an event would produce without publishing
    Manifest(ManifestArgs),

    /// Build the upload event for a local file
    Event(EventArgs),
}

/// Arguments for the notify command
#[derive(Args, Debug, Clone)]
pub struct NotifyArgs {
    /// Trigger event JSON file, or `-` for stdin
    #[arg(short, long, value_name = "FILE")]
    pub event: PathBuf,
}

/// Arguments for the manifest command
#[derive(Args, Debug, Clone)]
pub struct ManifestArgs {
    /// Trigger event JSON file, or `-` for stdin
    #[arg(short, long, value_name = "FILE")]
    pub event: PathBuf,

    /// Pretty-print the manifest
    #[arg(long)]
    pub pretty: bool,
}

/// Arguments for the event command
#[derive(Args, Debug, Clone)]
pub struct EventArgs {
    /// Local file to describe
    #[arg(short, long, value_name = "PATH")]
    pub file: PathBuf,

    /// Bucket name to put in the event
    #[arg(short, long, value_name = "NAME")]
    pub bucket: String,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the logging level based on global arguments
    pub fn log_level(&self) -> tracing::Level {
        if self.global.quiet {
            tracing::Level::ERROR
        } else if self.global.very_verbose {
            tracing::Level::DEBUG
        } else if self.global.verbose {
            tracing::Level::INFO
        } else {
            tracing::Level::WARN
        }
    }
}
