//! Integration tests for the upload notifier
//!
//! These tests drive whole trigger events through the notifier with
//! in-memory publisher and status tracker implementations, checking the
//! published manifests and the recorded delivery states.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use nifi_notify::app::{
    DeliveryStatus, Manifest, Notifier, Outcome, Publisher, StatusTracker, TopicPath, TriggerEvent,
};
use nifi_notify::config::Config;
use nifi_notify::errors::{PublishError, PublishResult, StatusResult};

#[derive(Default)]
struct RecordingPublisher {
    messages: Mutex<Vec<(String, Vec<u8>)>>,
}

#[async_trait]
impl Publisher for RecordingPublisher {
    async fn publish(&self, topic: &TopicPath, payload: Vec<u8>) -> PublishResult<String> {
        let mut messages = self.messages.lock().unwrap();
        messages.push((topic.to_string(), payload));
        Ok(messages.len().to_string())
    }
}

struct RejectingPublisher;

#[async_trait]
impl Publisher for RejectingPublisher {
    async fn publish(&self, topic: &TopicPath, _payload: Vec<u8>) -> PublishResult<String> {
        Err(PublishError::Rejected {
            topic: topic.to_string(),
            status: 404,
            body: "Resource not found".to_string(),
        })
    }
}

#[derive(Default)]
struct RecordingTracker {
    updates: Mutex<Vec<(String, DeliveryStatus, Option<String>)>>,
}

impl RecordingTracker {
    fn states(&self) -> Vec<DeliveryStatus> {
        self.updates.lock().unwrap().iter().map(|(_, s, _)| *s).collect()
    }

    fn last_error(&self) -> Option<String> {
        self.updates
            .lock()
            .unwrap()
            .last()
            .and_then(|(_, _, error)| error.clone())
    }
}

#[async_trait]
impl StatusTracker for RecordingTracker {
    async fn update_state(
        &self,
        file_name: &str,
        status: DeliveryStatus,
        error: Option<&str>,
    ) -> StatusResult<()> {
        self.updates.lock().unwrap().push((
            file_name.to_string(),
            status,
            error.map(str::to_string),
        ));
        Ok(())
    }
}

fn test_config() -> Config {
    let mut config = Config::default();
    config.apply_overrides(|key| {
        match key {
            "ENV" => Some("test"),
            "ON-PREM-SUBFOLDER" => Some("DEV"),
            "PROJECT_ID" => Some("test_project_id"),
            "TOPIC_NAME" => Some("nifi-notify"),
            _ => None,
        }
        .map(str::to_string)
    });
    config
}

fn upload(name: &str) -> TriggerEvent {
    TriggerEvent::from_json(&format!(
        r#"{{
            "name": "{}",
            "bucket": "ons-blaise-v2-nifi",
            "size": "20",
            "md5Hash": "0a14db6e48b947b57988a2f61469f228",
            "timeCreated": "0103202021_16428"
        }}"#,
        name
    ))
    .unwrap()
}

async fn publish(name: &str) -> (Manifest, Arc<RecordingPublisher>, Arc<RecordingTracker>) {
    let publisher = Arc::new(RecordingPublisher::default());
    let tracker = Arc::new(RecordingTracker::default());
    let notifier = Notifier::new(test_config(), publisher.clone(), tracker.clone());

    match notifier.handle(&upload(name)).await {
        Outcome::Published { manifest, .. } => (manifest, publisher, tracker),
        other => panic!("Expected {} to be published, got {:?}", name, other),
    }
}

fn iterations(manifest: &Manifest) -> [&str; 4] {
    [
        manifest.iteration_l1.as_str(),
        manifest.iteration_l2.as_str(),
        manifest.iteration_l3.as_str(),
        manifest.iteration_l4.as_str(),
    ]
}

#[tokio::test]
async fn test_default_data_delivery_is_published() {
    let (manifest, publisher, tracker) = publish("dd_OPN2102R_0103202021_16428.zip").await;

    assert_eq!(manifest.dataset, "blaise_dde");
    assert_eq!(iterations(&manifest), ["SYSTEMS", "DEV", "OPN", "OPN2102R"]);
    assert_eq!(manifest.full_size_megabytes, "0.000020");
    assert_eq!(
        manifest.files[0].checksum_hex,
        "d1ad7875be9ee3c6fde3b6f9efdf3c6b67fad78ebd7f6dbc"
    );

    let messages = publisher.messages.lock().unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].0, "projects/test_project_id/topics/nifi-notify");
    let published: Manifest = serde_json::from_slice(&messages[0].1).unwrap();
    assert_eq!(published, manifest);

    assert_eq!(
        tracker.states(),
        vec![DeliveryStatus::InNifiBucket, DeliveryStatus::NifiNotified]
    );
}

#[tokio::test]
async fn test_lms_data_delivery_is_published() {
    let (manifest, _, _) = publish("dd_LMS2102R_0103202021_16428.zip").await;

    assert_eq!(manifest.dataset, "blaise_dde_lms");
    assert_eq!(iterations(&manifest), ["CLOUD", "test", "LMS2102R", ""]);
}

#[tokio::test]
async fn test_frs_data_delivery_is_published() {
    let (manifest, _, _) = publish("dd_FRS2411A_0103202021_16428.zip").await;

    assert_eq!(manifest.dataset, "blaise_dde_frs");
    assert_eq!(
        iterations(&manifest),
        ["ingress", "survey_data", "bl5-test", "FRS2411A"]
    );
}

#[tokio::test]
async fn test_management_information_is_published() {
    let (manifest, _, _) = publish("mi_OPN2101A_0103202021_16428.zip").await;

    assert_eq!(manifest.dataset, "blaise_mi");
    assert_eq!(manifest.source_name, "gcp_blaise_test");
    assert_eq!(iterations(&manifest), ["BL5-test", "OPN", "OPN2101A", ""]);
    assert_eq!(
        manifest.description,
        "Management Information files uploaded to GCP bucket from Blaise5"
    );
}

#[tokio::test]
async fn test_invalid_extension_is_recorded_as_errored() {
    let publisher = Arc::new(RecordingPublisher::default());
    let tracker = Arc::new(RecordingTracker::default());
    let notifier = Notifier::new(test_config(), publisher.clone(), tracker.clone());

    let outcome = notifier.handle(&upload("dd_opn2101a.avi")).await;

    assert!(matches!(outcome, Outcome::Errored(_)));
    assert!(publisher.messages.lock().unwrap().is_empty());
    assert_eq!(
        tracker.states(),
        vec![DeliveryStatus::InNifiBucket, DeliveryStatus::Errored]
    );
    let error = tracker.last_error().unwrap();
    assert!(error.contains(".avi"), "unexpected error detail: {}", error);
}

#[tokio::test]
async fn test_invalid_file_type_is_recorded_as_errored() {
    let publisher = Arc::new(RecordingPublisher::default());
    let tracker = Arc::new(RecordingTracker::default());
    let notifier = Notifier::new(test_config(), publisher.clone(), tracker.clone());

    let outcome = notifier.handle(&upload("notMI_opn2101a.zip")).await;

    let Outcome::Errored(detail) = outcome else {
        panic!("Expected Errored outcome");
    };
    assert!(detail.contains("notmi"), "unexpected error detail: {}", detail);
    assert!(publisher.messages.lock().unwrap().is_empty());
    assert_eq!(tracker.last_error(), Some(detail));
}

#[tokio::test]
async fn test_missing_project_id_only_records_receipt() {
    let publisher = Arc::new(RecordingPublisher::default());
    let tracker = Arc::new(RecordingTracker::default());
    let config = Config {
        project_id: None,
        ..test_config()
    };
    let notifier = Notifier::new(config, publisher.clone(), tracker.clone());

    let outcome = notifier.handle(&upload("dd_OPN2102R_0103202021_16428.zip")).await;

    assert_eq!(outcome, Outcome::Skipped);
    assert!(publisher.messages.lock().unwrap().is_empty());
    assert_eq!(tracker.states(), vec![DeliveryStatus::InNifiBucket]);
}

#[tokio::test]
async fn test_rejected_publish_is_recorded_as_errored() {
    let tracker = Arc::new(RecordingTracker::default());
    let notifier = Notifier::new(test_config(), Arc::new(RejectingPublisher), tracker.clone());

    let outcome = notifier.handle(&upload("dd_OPN2102R_0103202021_16428.zip")).await;

    let expected =
        "Pub/Sub rejected publish to projects/test_project_id/topics/nifi-notify: HTTP 404: Resource not found";
    assert_eq!(outcome, Outcome::Errored(expected.to_string()));
    assert_eq!(
        tracker.states(),
        vec![DeliveryStatus::InNifiBucket, DeliveryStatus::Errored]
    );
    assert_eq!(tracker.last_error().as_deref(), Some(expected));
}

#[tokio::test]
async fn test_handling_is_repeatable() {
    let (first, _, _) = publish("dd_LMS2102_AA1.zip").await;
    let (second, _, _) = publish("dd_LMS2102_AA1.zip").await;

    assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
}
