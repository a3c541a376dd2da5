//! Prelude module for NiFi Notify Library
//!
//! This module re-exports the most commonly used items from the library,
//! so a typical integration needs a single `use nifi_notify::prelude::*;`.
//!
//! # Usage
//!
//! ```rust,no_run
//! use nifi_notify::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = Config::load(None).await?;
//!     let publisher = Arc::new(PubSubPublisher::new(&config.client).await?);
//!     let tracker = Arc::new(DdsClient::new(config.dds_url.as_deref(), &config.client)?);
//!     let notifier = Notifier::new(config, publisher, tracker);
//!
//!     let event = TriggerEvent::from_json(&std::fs::read_to_string("event.json")?)?;
//!     println!("{}", notifier.handle(&event).await);
//!     Ok(())
//! }
//! ```

// Core result types
pub use crate::errors::{AppError, Result};

// Configuration
pub use crate::config::Config;

// Essential app components
pub use crate::app::{
    // Classification engine
    classify,
    create_manifest,
    Category,
    ClientConfig,
    DdsClient,
    DeliveryStatus,
    DeploymentContext,
    FileDescriptor,
    Manifest,
    ManifestBuilder,
    // Orchestration
    Notifier,
    Outcome,
    PubSubPublisher,
    Publisher,
    StatusTracker,
    TopicPath,
    TriggerEvent,
};

// Commonly used constants
pub use crate::constants::{MANIFEST_VERSION, SCHEMA_VERSION, USER_AGENT};

pub use std::sync::Arc;

pub use tokio;
