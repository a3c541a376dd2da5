//! Application constants for NiFi Notify
//!
//! This module centralizes the constants used throughout the application,
//! organized by functional domain. Manifest literals are part of the wire
//! contract with the downstream NiFi flow and must not drift.

use std::time::Duration;

/// Environment variable names for deployment configuration
pub mod env {
    /// Deployment environment name (e.g. "dev", "test", "prod")
    pub const ENV: &str = "ENV";

    /// On-prem routing subfolder used by default data delivery
    pub const ON_PREM_SUBFOLDER: &str = "ON-PREM-SUBFOLDER";

    /// GCP project that owns the NiFi notification topic
    pub const PROJECT_ID: &str = "PROJECT_ID";

    /// Pub/Sub topic name for NiFi notifications
    pub const TOPIC_NAME: &str = "TOPIC_NAME";

    /// Base URL of the data delivery status service
    pub const DDS_URL: &str = "BLAISE_DDS_URL";
}

/// Manifest wire-format constants
pub mod manifest {
    /// Manifest format version
    pub const VERSION: u32 = 3;

    /// Manifest schema version
    pub const SCHEMA_VERSION: u32 = 1;

    /// Sensitivity marker applied to every manifest
    pub const SENSITIVITY: &str = "High";

    /// Relative path recorded against every file entry
    pub const RELATIVE_PATH: &str = ".\\";

    /// Prefix of the manifest `sourceName`, followed by the environment
    pub const SOURCE_NAME_PREFIX: &str = "gcp_blaise_";

    /// File extensions accepted for delivery
    pub const SUPPORTED_EXTENSIONS: &[&str] = &[".zip"];

    /// Category prefixes accepted for delivery
    pub const SUPPORTED_FILE_TYPES: &[&str] = &["dd", "mi"];

    /// Number of characters of the second name segment forming the survey code
    pub const SURVEY_CODE_LENGTH: usize = 3;

    /// Bytes per megabyte for `fullSizeMegabytes`
    pub const BYTES_PER_MEGABYTE: u64 = 1_000_000;

    /// Decimal places in `fullSizeMegabytes`
    pub const MEGABYTE_PRECISION: usize = 6;
}

/// Filename prefixes and survey code markers used by classification
pub mod naming {
    /// Management information category prefix
    pub const MANAGEMENT_INFORMATION_PREFIX: &str = "mi";

    /// Data delivery category prefix
    pub const DATA_DELIVERY_PREFIX: &str = "dd";

    /// Survey code prefix shared by the LMS family (LMS, LMC, LMB, ...)
    pub const LMS_SURVEY_PREFIX: &str = "LM";

    /// Survey code prefix for the Family Resources Survey
    pub const FRS_SURVEY_PREFIX: &str = "FRS";
}

/// Dataset identifiers written into manifests
pub mod datasets {
    pub const MANAGEMENT_INFORMATION: &str = "blaise_mi";
    pub const DATA_DELIVERY: &str = "blaise_dde";
    pub const DATA_DELIVERY_LMS: &str = "blaise_dde_lms";
    pub const DATA_DELIVERY_FRS: &str = "blaise_dde_frs";
}

/// Routing literals for the `iterationL1..L4` fields
pub mod routing {
    /// L1 prefix for management information, followed by the environment
    pub const MI_ENVIRONMENT_PREFIX: &str = "BL5-";

    /// L1 for default data delivery
    pub const SYSTEMS: &str = "SYSTEMS";

    /// L1 for LMS data delivery
    pub const CLOUD: &str = "CLOUD";

    /// L1 for FRS data delivery
    pub const INGRESS: &str = "ingress";

    /// L2 for FRS data delivery
    pub const SURVEY_DATA: &str = "survey_data";

    /// L3 prefix for FRS data delivery, followed by the environment
    pub const FRS_ENVIRONMENT_PREFIX: &str = "bl5-";
}

/// Delivery status names understood by the data delivery status service
pub mod status {
    pub const IN_NIFI_BUCKET: &str = "in_nifi_bucket";
    pub const NIFI_NOTIFIED: &str = "nifi_notified";
    pub const ERRORED: &str = "errored";
}

/// Google Cloud API endpoints and scopes
pub mod google {
    /// Pub/Sub REST API base URL
    pub const PUBSUB_BASE_URL: &str = "https://pubsub.googleapis.com/v1";

    /// OAuth scope required to publish
    pub const PUBSUB_SCOPE: &str = "https://www.googleapis.com/auth/pubsub";
}

/// HTTP client configuration constants
pub mod http {
    use super::Duration;

    /// Default user agent for all HTTP requests
    pub const USER_AGENT: &str = concat!("nifi-notify/", env!("CARGO_PKG_VERSION"));

    /// Default HTTP request timeout
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Connection establishment timeout
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
}

/// Configuration file locations
pub mod files {
    /// Project-local configuration file
    pub const LOCAL_CONFIG_FILE: &str = "./nifi-notify.toml";

    /// Directory name under the user config directory
    pub const CONFIG_DIR_NAME: &str = "nifi-notify";

    /// Configuration file name under `CONFIG_DIR_NAME`
    pub const CONFIG_FILE_NAME: &str = "config.toml";
}

// Re-export commonly used constants for convenience
pub use env::{ENV as ENV_NAME, PROJECT_ID as ENV_PROJECT_ID, TOPIC_NAME as ENV_TOPIC_NAME};
pub use http::USER_AGENT;
pub use manifest::{SCHEMA_VERSION, VERSION as MANIFEST_VERSION};
