//! Error types for NiFi Notify
//!
//! This module defines the error types for every stage of an invocation.
//! Classification and manifest errors are terminal for the upload they
//! describe; publish and status errors come from external services.

use std::path::PathBuf;
use thiserror::Error;

/// Filename classification errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ManifestError {
    /// Extension not in the supported set
    #[error("File extension '{extension}' is invalid, supported extensions: {supported:?}")]
    InvalidFileExtension {
        extension: String,
        supported: &'static [&'static str],
    },

    /// Category prefix is neither `dd` nor `mi`
    #[error("File type '{file_type}' is invalid, supported file types: {supported:?}")]
    InvalidFileType {
        file_type: String,
        supported: &'static [&'static str],
    },

    /// Name has a valid category prefix but no survey segment after it
    #[error("File name '{file_name}' has no survey segment after its category prefix")]
    MissingSurveyCode { file_name: String },

    /// Checksum or size could not be converted for the manifest
    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// Checksum and size conversion errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Checksum is not valid base64
    #[error("Checksum '{checksum}' is not valid base64: {reason}")]
    Decode { checksum: String, reason: String },

    /// Size is not a non-negative integer literal
    #[error("Size '{size}' is not a valid non-negative integer")]
    InvalidSize { size: String },
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    /// Configuration file could not be read
    #[error("Failed to read configuration file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration format
    #[error("Invalid configuration format")]
    InvalidFormat(#[from] toml::de::Error),

    /// Required deployment context is absent
    #[error("Missing required configuration: {field}")]
    ConfigurationMissing { field: String },
}

/// Pub/Sub publishing errors
#[derive(Error, Debug)]
pub enum PublishError {
    /// HTTP request failed
    #[error("Pub/Sub request failed")]
    Http(#[from] reqwest::Error),

    /// Could not obtain an access token
    #[error("Failed to obtain Google access token: {reason}")]
    Auth { reason: String },

    /// Pub/Sub rejected the publish call
    #[error("Pub/Sub rejected publish to {topic}: HTTP {status}: {body}")]
    Rejected {
        topic: String,
        status: u16,
        body: String,
    },

    /// Manifest could not be serialized
    #[error("Failed to serialize manifest")]
    Serialize(#[from] serde_json::Error),

    /// Generic transport failure
    #[error("{0}")]
    Other(String),
}

/// Delivery status tracker errors
#[derive(Error, Debug)]
pub enum StatusError {
    /// Tracker URL not configured
    #[error("Data delivery status service URL is not configured")]
    NotConfigured,

    /// Tracker URL could not be built
    #[error("Invalid data delivery status URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// HTTP request failed
    #[error("Data delivery status request failed")]
    Http(#[from] reqwest::Error),

    /// Tracker rejected the update
    #[error("Data delivery status service returned HTTP {status} for {file_name}")]
    Rejected { file_name: String, status: u16 },

    /// Generic tracker failure
    #[error("{0}")]
    Other(String),
}

/// Top-level application error that can represent any error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Classification or manifest error
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Publish error
    #[error(transparent)]
    Publish(#[from] PublishError),

    /// Status tracker error
    #[error(transparent)]
    Status(#[from] StatusError),

    /// Event JSON could not be parsed
    #[error("Invalid trigger event JSON")]
    Event(#[from] serde_json::Error),

    /// Generic I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Generic application error with context
    #[error("Application error: {message}")]
    Generic { message: String },
}

impl From<CodecError> for AppError {
    fn from(error: CodecError) -> Self {
        AppError::Manifest(ManifestError::Codec(error))
    }
}

impl AppError {
    /// Create a generic application error with a message
    pub fn generic(message: impl Into<String>) -> Self {
        Self::Generic {
            message: message.into(),
        }
    }

    /// Check if the error is transient; re-delivery of the event may succeed
    pub fn is_recoverable(&self) -> bool {
        match self {
            AppError::Publish(PublishError::Http(_))
            | AppError::Publish(PublishError::Auth { .. })
            | AppError::Status(StatusError::Http(_)) => true,

            AppError::Publish(PublishError::Rejected { status, .. })
            | AppError::Status(StatusError::Rejected { status, .. }) => {
                *status == 429 || *status >= 500
            }

            _ => false,
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            AppError::Manifest(ManifestError::Codec(_)) => "codec",
            AppError::Manifest(_) => "classification",
            AppError::Config(_) => "config",
            AppError::Publish(_) => "publish",
            AppError::Status(_) => "status",
            AppError::Event(_) => "event",
            AppError::Io(_) => "io",
            AppError::Generic { .. } => "generic",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;

/// Manifest result type alias
pub type ManifestResult<T> = std::result::Result<T, ManifestError>;

/// Codec result type alias
pub type CodecResult<T> = std::result::Result<T, CodecError>;

/// Config result type alias
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Publish result type alias
pub type PublishResult<T> = std::result::Result<T, PublishError>;

/// Status result type alias
pub type StatusResult<T> = std::result::Result<T, StatusError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::manifest::{SUPPORTED_EXTENSIONS, SUPPORTED_FILE_TYPES};

    #[test]
    fn test_invalid_extension_message() {
        let error = ManifestError::InvalidFileExtension {
            extension: ".avi".to_string(),
            supported: SUPPORTED_EXTENSIONS,
        };
        assert_eq!(
            error.to_string(),
            "File extension '.avi' is invalid, supported extensions: [\".zip\"]"
        );
    }

    #[test]
    fn test_invalid_file_type_message() {
        let error = ManifestError::InvalidFileType {
            file_type: "notmi".to_string(),
            supported: SUPPORTED_FILE_TYPES,
        };
        assert_eq!(
            error.to_string(),
            "File type 'notmi' is invalid, supported file types: [\"dd\", \"mi\"]"
        );
    }

    #[test]
    fn test_codec_error_converts_to_manifest_category() {
        let app_error: AppError = CodecError::InvalidSize {
            size: "abc".to_string(),
        }
        .into();

        assert_eq!(app_error.category(), "codec");
        assert!(!app_error.is_recoverable());
        assert_eq!(
            app_error.to_string(),
            "Size 'abc' is not a valid non-negative integer"
        );
    }

    #[test]
    fn test_recoverable_classification() {
        let throttled = AppError::Publish(PublishError::Rejected {
            topic: "projects/p/topics/t".to_string(),
            status: 429,
            body: String::new(),
        });
        let forbidden = AppError::Publish(PublishError::Rejected {
            topic: "projects/p/topics/t".to_string(),
            status: 403,
            body: String::new(),
        });

        assert!(throttled.is_recoverable());
        assert!(!forbidden.is_recoverable());
        assert_eq!(throttled.category(), "publish");
        assert!(!AppError::generic("boom").is_recoverable());
    }
}
