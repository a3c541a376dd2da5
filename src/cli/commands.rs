//! Command handlers for NiFi Notify CLI
//!
//! This module implements the command handlers that connect CLI arguments to
//! configuration loading and the core notifier.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::io::AsyncReadExt;
use tracing::{debug, info};

use crate::app::{create_manifest, DdsClient, Notifier, Outcome, PubSubPublisher, TriggerEvent};
use crate::cli::{EventArgs, ManifestArgs, NotifyArgs};
use crate::config::Config;
use crate::errors::Result;

/// Path argument that means "read from stdin"
const STDIN_PATH: &str = "-";

/// Handle the notify command
///
/// Runs one event through the notifier with the real Pub/Sub and DDS
/// clients. Failures inside the notifier are reported in the printed outcome
/// and do not fail the command.
pub async fn handle_notify(args: NotifyArgs, config_path: Option<PathBuf>) -> Result<()> {
    let config = Config::load(config_path).await?;
    let event = read_event(&args.event).await?;

    let publisher = Arc::new(PubSubPublisher::new(&config.client).await?);
    let tracker = Arc::new(DdsClient::new(config.dds_url.as_deref(), &config.client)?);
    let notifier = Notifier::new(config, publisher, tracker);

    let outcome = notifier.handle(&event).await;
    info!("Notification outcome for {}: {}", event.name, outcome);

    match &outcome {
        Outcome::Published { message_id, .. } => {
            println!("✅ {} published to NiFi (message id {})", event.name, message_id)
        }
        Outcome::Skipped => println!("⚠️  {} skipped: topic not configured", event.name),
        Outcome::Errored(detail) => println!("❌ {} errored: {}", event.name, detail),
    }

    Ok(())
}

/// Handle the manifest command
///
/// Builds the manifest for an event and prints it. Nothing is published and
/// no status is recorded.
pub async fn handle_manifest(args: ManifestArgs, config_path: Option<PathBuf>) -> Result<()> {
    let config = Config::load(config_path).await?;
    let event = read_event(&args.event).await?;

    let manifest = create_manifest(&event, &config.deployment_context())?;
    let json = if args.pretty {
        manifest.to_json_pretty()?
    } else {
        manifest.to_json()?
    };

    println!("{}", json);
    Ok(())
}

/// Handle the event command
pub async fn handle_event(args: EventArgs) -> Result<()> {
    let event = TriggerEvent::from_local_file(&args.file, &args.bucket).await?;
    println!("{}", event.to_json_pretty()?);
    Ok(())
}

/// Read a trigger event from a file, or stdin for `-`
async fn read_event(path: &Path) -> Result<TriggerEvent> {
    let json = if path == Path::new(STDIN_PATH) {
        debug!("Reading trigger event from stdin");
        let mut json = String::new();
        tokio::io::stdin().read_to_string(&mut json).await?;
        json
    } else {
        debug!("Reading trigger event from {}", path.display());
        tokio::fs::read_to_string(path).await?
    };

    TriggerEvent::from_json(&json)
}
