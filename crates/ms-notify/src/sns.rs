//! Amazon SNS backend
//!
//! Credentials and region come from the standard AWS provider chain; the
//! region and endpoint can be overridden from configuration (e.g. LocalStack).

use async_trait::async_trait;
use aws_sdk_sns::error::DisplayErrorContext;
use aws_sdk_sns::types::Subscription as SnsSubscription;
use aws_sdk_sns::Client;
use tracing::{debug, info};

use ms_common::{Protocol, SubscribeRequest, Subscription};
use ms_config::NotificationConfig;

use crate::{NotificationService, NotifyError, Result, SubscriptionPage};

/// SNS-backed notification service
#[derive(Clone)]
pub struct SnsNotificationService {
    client: Client,
}

impl std::fmt::Debug for SnsNotificationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnsNotificationService").finish_non_exhaustive()
    }
}

impl SnsNotificationService {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a client from a shared SDK config, applying configured overrides.
    pub fn from_sdk_config(sdk_config: &aws_config::SdkConfig, config: &NotificationConfig) -> Self {
        let mut builder = aws_sdk_sns::config::Builder::from(sdk_config);

        if let Some(region) = &config.region {
            builder = builder.region(aws_sdk_sns::config::Region::new(region.clone()));
        }
        if let Some(endpoint) = &config.endpoint_url {
            builder = builder.endpoint_url(endpoint);
        }

        info!(
            region = config.region.as_deref().unwrap_or("default"),
            endpoint = config.endpoint_url.as_deref().unwrap_or("default"),
            "Initialized SNS client"
        );

        Self::new(Client::from_conf(builder.build()))
    }

    /// Load the default AWS config from the environment and build a client.
    pub async fn from_env(config: &NotificationConfig) -> Self {
        let sdk_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self::from_sdk_config(&sdk_config, config)
    }
}

fn to_subscription(sub: &SnsSubscription, topic_arn: &str) -> Subscription {
    Subscription {
        protocol: Protocol::from(sub.protocol().unwrap_or_default()),
        endpoint: sub.endpoint().unwrap_or_default().to_string(),
        topic_arn: sub.topic_arn().unwrap_or(topic_arn).to_string(),
        subscription_arn: sub.subscription_arn().map(str::to_string),
        owner: sub.owner().map(str::to_string),
    }
}

#[async_trait]
impl NotificationService for SnsNotificationService {
    fn name(&self) -> &str {
        "sns"
    }

    async fn list_subscriptions_by_topic(
        &self,
        topic_arn: &str,
        next_token: Option<&str>,
    ) -> Result<SubscriptionPage> {
        let output = self.client
            .list_subscriptions_by_topic()
            .topic_arn(topic_arn)
            .set_next_token(next_token.map(str::to_string))
            .send()
            .await
            .map_err(|e| NotifyError::List {
                topic_arn: topic_arn.to_string(),
                message: DisplayErrorContext(&e).to_string(),
            })?;

        let subscriptions: Vec<Subscription> = output
            .subscriptions()
            .iter()
            .map(|s| to_subscription(s, topic_arn))
            .collect();

        debug!(
            topic_arn = %topic_arn,
            count = subscriptions.len(),
            has_more = output.next_token().is_some(),
            "Listed SNS subscriptions"
        );

        Ok(SubscriptionPage {
            subscriptions,
            next_token: output.next_token().map(str::to_string),
        })
    }

    async fn subscribe(&self, request: &SubscribeRequest) -> Result<Option<String>> {
        let output = self.client
            .subscribe()
            .protocol(request.protocol.as_str())
            .topic_arn(&request.topic_arn)
            .endpoint(&request.endpoint)
            .send()
            .await
            .map_err(|e| NotifyError::Subscribe {
                topic_arn: request.topic_arn.clone(),
                endpoint: request.endpoint.clone(),
                message: DisplayErrorContext(&e).to_string(),
            })?;

        debug!(
            topic_arn = %request.topic_arn,
            endpoint = %request.endpoint,
            "SNS subscribe accepted"
        );

        Ok(output.subscription_arn().map(str::to_string))
    }
}
