//! Core application logic for NiFi Notify
//!
//! This module contains the filename classification engine, manifest
//! construction, and the clients and orchestration that deliver a manifest
//! to NiFi for each uploaded file.
//!
//! # Examples
//!
//! ```rust
//! use nifi_notify::app::{classify, Category, FileDescriptor};
//!
//! let file = FileDescriptor::parse(
//!     "dd_LMS2102_AA1.zip",
//!     "ons-blaise-v2-nifi",
//!     "20",
//!     "1B2M2Y8AsgTpgAmY7PhCfg==",
//!     "0103202021_16428",
//! );
//! assert_eq!(file.survey_code(), "LMS");
//! assert_eq!(classify(&file), Ok(Category::DataDeliveryLms));
//! ```

pub mod classifier;
pub mod client;
pub mod codec;
pub mod descriptor;
pub mod event;
pub mod manifest;
pub mod notifier;
pub mod publisher;
pub mod status;

// Re-export main public API
pub use classifier::{classify, Category};
pub use client::ClientConfig;
pub use codec::{decode_checksum, format_megabytes};
pub use descriptor::FileDescriptor;
pub use event::TriggerEvent;
pub use manifest::{create_manifest, DeploymentContext, FileEntry, Manifest, ManifestBuilder};
pub use notifier::{Notifier, Outcome};
pub use publisher::{PubSubPublisher, Publisher, TopicPath};
pub use status::{DdsClient, DeliveryStatus, StatusTracker};
