//! Storage upload notifications
//!
//! The trigger event is the object-finalize payload from Cloud Storage.
//! Only the fields the manifest needs are modeled; everything else in the
//! notification is ignored during deserialization.

use std::path::Path;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::app::codec::encode_checksum;
use crate::errors::{AppError, Result};

/// Upload notification for a single object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerEvent {
    /// Object name, e.g. `dd_OPN2102R_0103202021_16428.zip`
    pub name: String,
    /// Bucket the object was written to
    pub bucket: String,
    /// Object size in bytes as decimal text
    pub size: String,
    /// Base64 MD5 of the object contents
    pub md5_hash: String,
    /// Creation timestamp, passed through unmodified
    pub time_created: String,
}

impl TriggerEvent {
    /// Parse an event from its JSON representation
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(AppError::Event)
    }

    /// Serialize the event back into notification JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(AppError::Event)
    }

    /// Build the notification Cloud Storage would send for a local file
    ///
    /// The object name is the file's name; the checksum is the base64 MD5 of
    /// its contents and the creation time is the current UTC time.
    pub async fn from_local_file(path: &Path, bucket: &str) -> Result<Self> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| AppError::generic(format!("Invalid file name: {}", path.display())))?
            .to_string();

        let contents = tokio::fs::read(path).await?;
        let digest = md5::compute(&contents);
        debug!("MD5 of {}: {:x}", path.display(), digest);

        Ok(Self {
            name,
            bucket: bucket.to_string(),
            size: contents.len().to_string(),
            md5_hash: encode_checksum(&digest.0),
            time_created: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        })
    }
}
