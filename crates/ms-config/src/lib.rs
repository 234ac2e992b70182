//! Mailsub Configuration
//!
//! TOML-based configuration with environment variable overrides.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

mod loader;

pub use loader::ConfigLoader;

/// Topic the function subscribes addresses to when nothing else is configured.
pub const DEFAULT_TOPIC_ARN: &str = "arn:aws:sns:us-east-1:424073965370:acmeware-web-subscription";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Root application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub notification: NotificationConfig,
}

/// Notification service (SNS) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// Topic every incoming address is subscribed to
    pub topic_arn: String,
    /// Region override; the AWS provider chain decides when unset
    pub region: Option<String>,
    /// Endpoint override (e.g. LocalStack)
    pub endpoint_url: Option<String>,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            topic_arn: DEFAULT_TOPIC_ARN.to_string(),
            region: None,
            endpoint_url: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration with environment variable override
    pub fn load() -> Result<Self, ConfigError> {
        ConfigLoader::new().load()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let notification = &self.notification;

        if notification.topic_arn.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "notification.topic_arn must not be empty".to_string(),
            ));
        }
        if notification.region.as_deref().is_some_and(|r| r.trim().is_empty()) {
            return Err(ConfigError::ValidationError(
                "notification.region must not be empty when set".to_string(),
            ));
        }
        if notification.endpoint_url.as_deref().is_some_and(|u| u.trim().is_empty()) {
            return Err(ConfigError::ValidationError(
                "notification.endpoint_url must not be empty when set".to_string(),
            ));
        }

        Ok(())
    }

    /// Generate an example TOML configuration
    pub fn example_toml() -> String {
        format!(
            r#"# Mailsub Configuration
# Environment variables override these settings

[notification]
topic_arn = "{DEFAULT_TOPIC_ARN}"
# region = "us-east-1"
# endpoint_url = "http://localhost:4566"
"#
        )
    }
}
