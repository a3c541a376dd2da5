//! NiFi Notify CLI application
//!
//! Command-line interface for publishing NiFi manifests for Blaise uploads.

use std::process;

use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use nifi_notify::cli::{handle_event, handle_manifest, handle_notify, Cli, Commands};
use nifi_notify::errors::Result;

#[tokio::main]
async fn main() {
    let result = run().await;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Main application logic
async fn run() -> Result<()> {
    // Load environment variables from .env file if it exists
    dotenv::dotenv().ok();

    let cli = Cli::parse_args();
    init_logging(&cli);

    info!("NiFi Notify v{} starting", env!("CARGO_PKG_VERSION"));

    let config_path = cli.global.config.clone();
    match cli.command {
        Commands::Notify(args) => {
            info!("Executing notify command");
            handle_notify(args, config_path).await
        }
        Commands::Manifest(args) => {
            info!("Executing manifest command");
            handle_manifest(args, config_path).await
        }
        Commands::Event(args) => {
            info!("Executing event command");
            handle_event(args).await
        }
    }
}

/// Initialize logging based on CLI verbosity settings
fn init_logging(cli: &Cli) {
    let log_level = cli.log_level();

    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = format!("nifi_notify={}", log_level).parse() {
        filter = filter.add_directive(directive);
    }

    // Logs go to stderr so command output on stdout stays machine readable
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(cli.global.very_verbose)
        .init();

    if cli.global.very_verbose {
        info!("Very verbose logging enabled");
    } else if cli.global.verbose {
        info!("Verbose logging enabled");
    }
}
