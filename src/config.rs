//! Configuration management for NiFi Notify
//!
//! Deployment configuration is layered: built-in defaults, then an optional
//! TOML file, then environment variables. The environment always wins, so a
//! deployed function can run with no config file at all.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::app::client::ClientConfig;
use crate::app::manifest::DeploymentContext;
use crate::app::publisher::TopicPath;
use crate::constants::{env, files};
use crate::errors::{ConfigError, ConfigResult};

/// Deployment configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Environment name, e.g. `test`
    pub env: Option<String>,
    /// On-prem routing subfolder for default data delivery
    pub on_prem_subfolder: Option<String>,
    /// GCP project owning the notification topic
    pub project_id: Option<String>,
    /// Notification topic name
    pub topic_name: Option<String>,
    /// Data delivery status service base URL
    pub dds_url: Option<String>,
    /// HTTP client settings
    pub client: ClientConfig,
}

impl Config {
    /// Build configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_overrides(|key| std::env::var(key).ok());
        config
    }

    /// Load configuration with multi-source precedence:
    /// 1. Default values
    /// 2. Config file (explicit path, else the first standard location found)
    /// 3. Environment variables
    ///
    /// # Errors
    ///
    /// Fails if an explicitly given file is missing, or any file found cannot
    /// be read or parsed.
    pub async fn load(config_file_override: Option<PathBuf>) -> ConfigResult<Self> {
        let config_path = match config_file_override {
            Some(path) if !path.exists() => return Err(ConfigError::NotFound { path }),
            Some(path) => Some(path),
            None => Self::find_config_file(),
        };

        let mut config = match config_path {
            Some(path) => Self::load_from_file(&path).await?,
            None => Self::default(),
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Apply overrides from a variable lookup; empty values count as unset
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.is_empty());

        if let Some(value) = lookup(env::ENV) {
            self.env = Some(value);
        }
        if let Some(value) = lookup(env::ON_PREM_SUBFOLDER) {
            self.on_prem_subfolder = Some(value);
        }
        if let Some(value) = lookup(env::PROJECT_ID) {
            self.project_id = Some(value);
        }
        if let Some(value) = lookup(env::TOPIC_NAME) {
            self.topic_name = Some(value);
        }
        if let Some(value) = lookup(env::DDS_URL) {
            self.dds_url = Some(value);
        }
    }

    /// Log the effective configuration
    pub fn log(&self) {
        info!("Configuration: Project ID: {}", or_none(&self.project_id));
        info!("Configuration: Topic Name: {}", or_none(&self.topic_name));
        info!(
            "Configuration: ON-PREM-SUBFOLDER: {}",
            or_none(&self.on_prem_subfolder)
        );
        info!("Configuration: Env: {}", or_none(&self.env));
        debug!("Configuration: DDS URL: {}", or_none(&self.dds_url));
    }

    /// Topic to publish to, if both project and topic are configured
    pub fn topic_path(&self) -> Option<TopicPath> {
        match (&self.project_id, &self.topic_name) {
            (Some(project_id), Some(topic_name)) => {
                Some(TopicPath::new(project_id.as_str(), topic_name.as_str()))
            }
            _ => None,
        }
    }

    /// Topic to publish to, or the first missing field
    pub fn require_topic_path(&self) -> ConfigResult<TopicPath> {
        let missing = |field: &str| ConfigError::ConfigurationMissing {
            field: field.to_string(),
        };
        let project_id = self.project_id.as_deref().ok_or_else(|| missing(env::PROJECT_ID))?;
        let topic_name = self.topic_name.as_deref().ok_or_else(|| missing(env::TOPIC_NAME))?;
        Ok(TopicPath::new(project_id, topic_name))
    }

    /// Routing context for manifests
    ///
    /// A missing environment or subfolder becomes an empty string.
    pub fn deployment_context(&self) -> DeploymentContext {
        if self.env.is_none() {
            warn!("{} is not set; manifests will carry an empty environment", env::ENV);
        }
        if self.on_prem_subfolder.is_none() {
            debug!("{} is not set", env::ON_PREM_SUBFOLDER);
        }
        DeploymentContext::new(
            self.env.clone().unwrap_or_default(),
            self.on_prem_subfolder.clone().unwrap_or_default(),
        )
    }

    /// Find configuration file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        let mut search_paths = vec![PathBuf::from(files::LOCAL_CONFIG_FILE)];
        if let Some(config_dir) = dirs::config_dir() {
            search_paths.push(
                config_dir
                    .join(files::CONFIG_DIR_NAME)
                    .join(files::CONFIG_FILE_NAME),
            );
        }

        let found = search_paths.into_iter().find(|path| path.exists());
        match &found {
            Some(path) => debug!("Found config file: {}", path.display()),
            None => debug!("No config file found in standard locations"),
        }
        found
    }

    /// Load configuration from a TOML file
    async fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let config: Config = toml::from_str(&content)?;
        info!("Loaded configuration from: {}", path.display());
        Ok(config)
    }
}

fn or_none(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("None")
}
