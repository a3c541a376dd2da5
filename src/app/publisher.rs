//! Manifest publishing to Google Cloud Pub/Sub
//!
//! Publishing goes through the Pub/Sub REST API with an access token from
//! the ambient Google credentials. There is no retry here; a failed publish
//! is reported once and re-delivery is left to the triggering platform.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use gcp_auth::TokenProvider;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::app::client::ClientConfig;
use crate::constants::google;
use crate::errors::{PublishError, PublishResult};

/// Fully qualified topic path: `projects/<project>/topics/<topic>`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TopicPath {
    project_id: String,
    topic_name: String,
}

impl TopicPath {
    pub fn new(project_id: impl Into<String>, topic_name: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            topic_name: topic_name.into(),
        }
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn topic_name(&self) -> &str {
        &self.topic_name
    }
}

impl fmt::Display for TopicPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "projects/{}/topics/{}", self.project_id, self.topic_name)
    }
}

/// Publishes message payloads to a topic
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Publish `payload` to `topic`, returning the server-assigned message id
    async fn publish(&self, topic: &TopicPath, payload: Vec<u8>) -> PublishResult<String>;
}

#[derive(Debug, Serialize)]
struct PublishRequest {
    messages: Vec<PubsubMessage>,
}

#[derive(Debug, Serialize)]
struct PubsubMessage {
    /// Base64 payload
    data: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PublishResponse {
    #[serde(default)]
    message_ids: Vec<String>,
}

/// Pub/Sub REST publisher
pub struct PubSubPublisher {
    client: Client,
    token_provider: Arc<dyn TokenProvider>,
    base_url: String,
}

// Manual Debug implementation since TokenProvider doesn't implement Debug
impl fmt::Debug for PubSubPublisher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PubSubPublisher")
            .field("client", &self.client)
            .field("token_provider", &"<TokenProvider>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl PubSubPublisher {
    /// Create a publisher using the default Google credentials
    ///
    /// # Errors
    ///
    /// Returns `PublishError::Auth` if no credentials can be found and
    /// `PublishError::Http` if the HTTP client cannot be built.
    pub async fn new(config: &ClientConfig) -> PublishResult<Self> {
        let token_provider = gcp_auth::provider()
            .await
            .map_err(|e| PublishError::Auth {
                reason: e.to_string(),
            })?;
        Self::with_token_provider(token_provider, config)
    }

    /// Create a publisher with an explicit token provider
    pub fn with_token_provider(
        token_provider: Arc<dyn TokenProvider>,
        config: &ClientConfig,
    ) -> PublishResult<Self> {
        let client = config.build_http_client()?;

        Ok(Self {
            client,
            token_provider,
            base_url: google::PUBSUB_BASE_URL.to_string(),
        })
    }

    /// Override the API base URL (e.g. for the Pub/Sub emulator)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn publish_url(&self, topic: &TopicPath) -> String {
        format!("{}/{}:publish", self.base_url.trim_end_matches('/'), topic)
    }

    async fn access_token(&self) -> PublishResult<String> {
        let token = self
            .token_provider
            .token(&[google::PUBSUB_SCOPE])
            .await
            .map_err(|e| PublishError::Auth {
                reason: e.to_string(),
            })?;
        Ok(token.as_str().to_string())
    }
}

/// Request body for publishing one payload
fn publish_request(payload: &[u8]) -> PublishRequest {
    PublishRequest {
        messages: vec![PubsubMessage {
            data: STANDARD.encode(payload),
        }],
    }
}

/// Message id from an accepted publish, or `""` if the server sent none
fn first_message_id(response: PublishResponse, topic: &TopicPath) -> String {
    response.message_ids.into_iter().next().unwrap_or_else(|| {
        warn!("Publish to {} accepted without a message id", topic);
        String::new()
    })
}

#[async_trait]
impl Publisher for PubSubPublisher {
    async fn publish(&self, topic: &TopicPath, payload: Vec<u8>) -> PublishResult<String> {
        let url = self.publish_url(topic);
        let access_token = self.access_token().await?;
        debug!("Publishing {} bytes to {}", payload.len(), topic);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&access_token)
            .json(&publish_request(&payload))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PublishError::Rejected {
                topic: topic.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let published: PublishResponse = response.json().await?;
        let message_id = first_message_id(published, topic);
        info!("Message published to {} with id {}", topic, message_id);
        Ok(message_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_path() {
        let topic = TopicPath::new("test_project_id", "nifi-notify");
        assert_eq!(topic.to_string(), "projects/test_project_id/topics/nifi-notify");
        assert_eq!(topic.project_id(), "test_project_id");
        assert_eq!(topic.topic_name(), "nifi-notify");
    }

    #[test]
    fn test_publish_request_encodes_payload() {
        let request = serde_json::to_value(publish_request(b"{\"version\":3}")).unwrap();
        assert_eq!(
            request,
            serde_json::json!({"messages": [{"data": "eyJ2ZXJzaW9uIjozfQ=="}]})
        );
    }

    #[test]
    fn test_publish_response_parsing() {
        let response: PublishResponse =
            serde_json::from_str(r#"{"messageIds": ["4711"]}"#).unwrap();
        assert_eq!(response.message_ids, vec!["4711".to_string()]);

        let empty: PublishResponse = serde_json::from_str("{}").unwrap();
        assert!(empty.message_ids.is_empty());
    }

    #[test]
    fn test_accepted_publish_without_message_id() {
        let topic = TopicPath::new("test_project_id", "nifi-notify");

        let response: PublishResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(first_message_id(response, &topic), "");

        let response: PublishResponse =
            serde_json::from_str(r#"{"messageIds": ["4711", "4712"]}"#).unwrap();
        assert_eq!(first_message_id(response, &topic), "4711");
    }
}
