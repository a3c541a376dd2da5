//! Data delivery status tracking
//!
//! Every upload's progress is recorded with the data delivery status (DDS)
//! service. Updates are best effort: the notifier logs failures and carries
//! on, so a tracker outage never blocks a delivery.

use std::fmt;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::app::client::ClientConfig;
use crate::constants::status;
use crate::errors::{StatusError, StatusResult};

/// Delivery states reported by this service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    /// Upload observed in the NiFi bucket
    InNifiBucket,
    /// Manifest published to NiFi
    NifiNotified,
    /// Processing failed; see the error detail
    Errored,
}

impl DeliveryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InNifiBucket => status::IN_NIFI_BUCKET,
            Self::NifiNotified => status::NIFI_NOTIFIED,
            Self::Errored => status::ERRORED,
        }
    }
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Records delivery status for uploaded files
#[async_trait]
pub trait StatusTracker: Send + Sync {
    /// Record `status` for `file_name`, with an error detail for failures
    async fn update_state(
        &self,
        file_name: &str,
        status: DeliveryStatus,
        error: Option<&str>,
    ) -> StatusResult<()>;
}

/// Request body for a DDS state update
#[derive(Debug, Serialize)]
struct StateUpdate<'a> {
    state: DeliveryStatus,
    error_info: Option<&'a str>,
}

/// HTTP client for the data delivery status service
#[derive(Debug, Clone)]
pub struct DdsClient {
    client: Client,
    base_url: Option<Url>,
}

impl DdsClient {
    /// Create a client for the service at `base_url`
    ///
    /// A missing URL yields a client whose updates fail with
    /// `StatusError::NotConfigured`.
    pub fn new(base_url: Option<&str>, config: &ClientConfig) -> StatusResult<Self> {
        let base_url = base_url.map(Url::parse).transpose()?;
        let client = config.build_http_client()?;

        Ok(Self { client, base_url })
    }

    /// URL of the state resource for a file
    pub fn state_url(&self, file_name: &str) -> StatusResult<Url> {
        let base_url = self.base_url.as_ref().ok_or(StatusError::NotConfigured)?;
        let mut url = base_url.clone();
        url.path_segments_mut()
            .map_err(|_| StatusError::Other(format!("URL cannot be a base: {}", base_url)))?
            .pop_if_empty()
            .extend(["v1", "state", file_name]);
        Ok(url)
    }
}

#[async_trait]
impl StatusTracker for DdsClient {
    async fn update_state(
        &self,
        file_name: &str,
        status: DeliveryStatus,
        error: Option<&str>,
    ) -> StatusResult<()> {
        let url = self.state_url(file_name)?;
        debug!("Updating DDS state for {} to {}", file_name, status);

        let response = self
            .client
            .patch(url)
            .json(&StateUpdate {
                state: status,
                error_info: error,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(StatusError::Rejected {
                file_name: file_name.to_string(),
                status: response.status().as_u16(),
            });
        }

        Ok(())
    }
}
