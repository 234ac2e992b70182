//! Read-before-write subscription of an email address to a topic.
//!
//! The service has no "subscribe if absent" primitive, so two invocations
//! racing for the same address may both subscribe. The service converges
//! identical subscribe requests to one subscription.

use futures::TryStreamExt;
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info, info_span, Instrument};

use ms_common::{Protocol, SubscribeRequest, Subscription};

use crate::{subscription_pages, NotificationService, Result};

/// What an ensure call did
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum EnsureOutcome {
    /// A matching subscription was listed; nothing was sent
    #[serde(rename_all = "camelCase")]
    AlreadySubscribed { subscription_arn: Option<String> },
    /// A subscribe request was accepted
    #[serde(rename_all = "camelCase")]
    SubscriptionRequested { subscription_arn: Option<String> },
}

impl EnsureOutcome {
    pub fn was_requested(&self) -> bool {
        matches!(self, EnsureOutcome::SubscriptionRequested { .. })
    }
}

/// Subscribes email addresses to a topic unless already subscribed.
#[derive(Clone)]
pub struct SubscriptionEnsurer {
    service: Arc<dyn NotificationService>,
    topic_arn: String,
}

impl SubscriptionEnsurer {
    pub fn new(service: Arc<dyn NotificationService>, topic_arn: impl Into<String>) -> Self {
        Self {
            service,
            topic_arn: topic_arn.into(),
        }
    }

    /// The configured topic
    pub fn topic_arn(&self) -> &str {
        &self.topic_arn
    }

    /// Ensure `email` is subscribed to the configured topic.
    pub async fn ensure(&self, email: &str) -> Result<EnsureOutcome> {
        self.create_subscription(&self.topic_arn, email).await
    }

    /// First `email`-protocol subscription for `email` on `topic_arn`, scanning
    /// pages in order and stopping at the first match.
    pub async fn find_existing_subscription(
        &self,
        topic_arn: &str,
        email: &str,
    ) -> Result<Option<Subscription>> {
        let mut pages = Box::pin(subscription_pages(self.service.as_ref(), topic_arn));
        let mut page_number = 0usize;

        loop {
            let page = match pages.try_next().await {
                Ok(Some(page)) => page,
                Ok(None) => return Ok(None),
                Err(e) => {
                    error!(
                        topic_arn = %topic_arn,
                        page = page_number,
                        error = %e,
                        "Error listing subscriptions"
                    );
                    return Err(e);
                }
            };

            if let Some(found) = page
                .subscriptions
                .into_iter()
                .find(|s| s.matches(&Protocol::Email, email))
            {
                return Ok(Some(found));
            }
            page_number += 1;
        }
    }

    /// Subscribe `email` to `topic_arn` unless a matching subscription exists.
    pub async fn create_subscription(&self, topic_arn: &str, email: &str) -> Result<EnsureOutcome> {
        let span = info_span!(
            "ensure_subscription",
            topic_arn = %topic_arn,
            endpoint = %email,
            backend = %self.service.name(),
        );

        self.subscribe_if_absent(topic_arn, email)
            .instrument(span)
            .await
    }

    async fn subscribe_if_absent(&self, topic_arn: &str, email: &str) -> Result<EnsureOutcome> {
        if let Some(existing) = self.find_existing_subscription(topic_arn, email).await? {
            info!(
                subscription_arn = existing.subscription_arn.as_deref().unwrap_or("-"),
                pending = existing.is_pending_confirmation(),
                "Subscription already exists"
            );
            return Ok(EnsureOutcome::AlreadySubscribed {
                subscription_arn: existing.subscription_arn,
            });
        }

        let request = SubscribeRequest::email(topic_arn, email);
        match self.service.subscribe(&request).await {
            Ok(subscription_arn) => {
                info!("Subscribed {} to {}", email, topic_arn);
                Ok(EnsureOutcome::SubscriptionRequested { subscription_arn })
            }
            Err(e) => {
                error!(error = %e, "Error setting up email subscription");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::InMemoryNotificationService;

    #[test]
    fn test_outcome_serializes_with_status_tag() {
        let json = serde_json::to_value(EnsureOutcome::SubscriptionRequested {
            subscription_arn: Some("pending confirmation".to_string()),
        })
        .unwrap();

        assert_eq!(json["status"], "subscriptionRequested");
        assert_eq!(json["subscriptionArn"], "pending confirmation");
    }

    #[tokio::test]
    async fn test_ensure_uses_configured_topic() {
        let service = Arc::new(InMemoryNotificationService::with_pages(vec![]));
        let ensurer = SubscriptionEnsurer::new(service.clone(), "T9");

        ensurer.ensure("a@x.com").await.unwrap();

        let calls = service.subscribe_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].topic_arn, "T9");
        assert_eq!(ensurer.topic_arn(), "T9");
    }
}
