//! Upload notification orchestration
//!
//! The notifier drives one trigger event end to end: it records receipt with
//! the status tracker, checks that a topic is configured, builds the manifest,
//! publishes it and records the final state. It never returns an error; every
//! failure is logged and turned into an `errored` status update instead.
//!
//! # Examples
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use nifi_notify::app::{DdsClient, Notifier, PubSubPublisher, TriggerEvent};
//! use nifi_notify::config::Config;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::from_env();
//! let publisher = Arc::new(PubSubPublisher::new(&config.client).await?);
//! let tracker = Arc::new(DdsClient::new(config.dds_url.as_deref(), &config.client)?);
//!
//! let notifier = Notifier::new(config, publisher, tracker);
//! let event = TriggerEvent::from_json(r#"{"name": "dd_OPN2102R.zip", "bucket": "ons-blaise-v2-nifi",
//!     "size": "20", "md5Hash": "1B2M2Y8AsgTpgAmY7PhCfg==", "timeCreated": "0103202021_16428"}"#)?;
//! let outcome = notifier.handle(&event).await;
//! println!("{}", outcome);
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::sync::Arc;

use tracing::{error, info, warn};

use crate::app::event::TriggerEvent;
use crate::app::manifest::{create_manifest, DeploymentContext, Manifest};
use crate::app::publisher::{Publisher, TopicPath};
use crate::app::status::{DeliveryStatus, StatusTracker};
use crate::config::Config;
use crate::errors::Result;

/// Result of handling one trigger event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Manifest published and `nifi_notified` recorded
    Published {
        manifest: Manifest,
        message_id: String,
    },
    /// No topic configured; nothing was classified or published
    Skipped,
    /// Processing failed and `errored` was recorded with this detail
    Errored(String),
}

impl Outcome {
    pub fn is_published(&self) -> bool {
        matches!(self, Self::Published { .. })
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Published { message_id, .. } => write!(f, "published (message id {})", message_id),
            Self::Skipped => f.write_str("skipped: topic not configured"),
            Self::Errored(detail) => write!(f, "errored: {}", detail),
        }
    }
}

/// Handles upload trigger events
pub struct Notifier {
    config: Config,
    context: DeploymentContext,
    publisher: Arc<dyn Publisher>,
    tracker: Arc<dyn StatusTracker>,
}

impl Notifier {
    /// Create a notifier from configuration and its two collaborators
    pub fn new(
        config: Config,
        publisher: Arc<dyn Publisher>,
        tracker: Arc<dyn StatusTracker>,
    ) -> Self {
        let context = config.deployment_context();
        Self {
            config,
            context,
            publisher,
            tracker,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Handle one trigger event
    pub async fn handle(&self, event: &TriggerEvent) -> Outcome {
        self.config.log();
        info!("Configuration: File name: {}", event.name);
        info!("Configuration: Bucket Name: {}", event.bucket);

        self.record_status(&event.name, DeliveryStatus::InNifiBucket, None)
            .await;

        let Some(topic) = self.config.topic_path() else {
            error!("project_id not set, publish failed");
            return Outcome::Skipped;
        };

        match self.publish_manifest(event, &topic).await {
            Ok((manifest, message_id)) => {
                self.record_status(&event.name, DeliveryStatus::NifiNotified, None)
                    .await;
                Outcome::Published {
                    manifest,
                    message_id,
                }
            }
            Err(e) => {
                let detail = e.to_string();
                error!(
                    "Failed to notify NiFi of {} ({} error, recoverable: {}): {}",
                    event.name,
                    e.category(),
                    e.is_recoverable(),
                    detail
                );
                self.record_status(&event.name, DeliveryStatus::Errored, Some(&detail))
                    .await;
                Outcome::Errored(detail)
            }
        }
    }

    async fn publish_manifest(
        &self,
        event: &TriggerEvent,
        topic: &TopicPath,
    ) -> Result<(Manifest, String)> {
        let manifest = create_manifest(event, &self.context)?;
        info!("Message data: {}", manifest.to_json()?);

        let message_id = self.publisher.publish(topic, manifest.to_bytes()?).await?;
        Ok((manifest, message_id))
    }

    async fn record_status(&self, file_name: &str, status: DeliveryStatus, error: Option<&str>) {
        if let Err(e) = self.tracker.update_state(file_name, status, error).await {
            warn!("Failed to record {} for {}: {}", status, file_name, e);
        }
    }
}
