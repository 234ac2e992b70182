use serde::{Deserialize, Serialize};
use std::fmt;

pub mod logging;

// ============================================================================
// Subscription Types
// ============================================================================

/// Subscription identifier the notification service reports until the
/// endpoint owner confirms the subscription.
pub const PENDING_CONFIRMATION: &str = "PendingConfirmation";

/// Delivery protocol of a topic subscription.
///
/// The service accepts a fixed set of protocols; anything it reports that we
/// do not know about is kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Protocol {
    Email,
    EmailJson,
    Sms,
    Http,
    Https,
    Sqs,
    Lambda,
    Application,
    Firehose,
    Other(String),
}

impl Protocol {
    pub fn as_str(&self) -> &str {
        match self {
            Protocol::Email => "email",
            Protocol::EmailJson => "email-json",
            Protocol::Sms => "sms",
            Protocol::Http => "http",
            Protocol::Https => "https",
            Protocol::Sqs => "sqs",
            Protocol::Lambda => "lambda",
            Protocol::Application => "application",
            Protocol::Firehose => "firehose",
            Protocol::Other(s) => s,
        }
    }
}

impl From<&str> for Protocol {
    fn from(value: &str) -> Self {
        match value {
            "email" => Protocol::Email,
            "email-json" => Protocol::EmailJson,
            "sms" => Protocol::Sms,
            "http" => Protocol::Http,
            "https" => Protocol::Https,
            "sqs" => Protocol::Sqs,
            "lambda" => Protocol::Lambda,
            "application" => Protocol::Application,
            "firehose" => Protocol::Firehose,
            other => Protocol::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Protocol {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Protocol {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Protocol::from(s.as_str()))
    }
}

/// A binding of a protocol and endpoint to a topic, as listed by the
/// notification service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub protocol: Protocol,
    pub endpoint: String,
    pub topic_arn: String,
    /// Assigned by the service; `PendingConfirmation` until confirmed
    #[serde(default)]
    pub subscription_arn: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
}

impl Subscription {
    /// True when this record delivers `protocol` to exactly `endpoint`.
    pub fn matches(&self, protocol: &Protocol, endpoint: &str) -> bool {
        &self.protocol == protocol && self.endpoint == endpoint
    }

    pub fn is_pending_confirmation(&self) -> bool {
        self.subscription_arn.as_deref() == Some(PENDING_CONFIRMATION)
    }
}

/// A subscribe request sent to the notification service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeRequest {
    pub protocol: Protocol,
    pub topic_arn: String,
    pub endpoint: String,
}

impl SubscribeRequest {
    pub fn email(topic_arn: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            protocol: Protocol::Email,
            topic_arn: topic_arn.into(),
            endpoint: endpoint.into(),
        }
    }
}

// ============================================================================
// Invocation Event
// ============================================================================

/// Payload delivered by the IoT button rule that invokes the function.
///
/// Only `email` is used; the remaining fields are informational.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonEvent {
    pub email: String,
    #[serde(default)]
    pub serial_number: Option<String>,
    #[serde(default)]
    pub battery_voltage: Option<String>,
    #[serde(default)]
    pub click_type: Option<ClickType>,
}

/// `Long` is sent when the first press lasts longer than 1.5 seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ClickType {
    Single,
    Double,
    Long,
}

impl fmt::Display for ClickType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ClickType::Single => "SINGLE",
            ClickType::Double => "DOUBLE",
            ClickType::Long => "LONG",
        };
        f.write_str(s)
    }
}
