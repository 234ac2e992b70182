use async_trait::async_trait;
use ms_common::{SubscribeRequest, Subscription};

pub mod ensurer;
pub mod error;
pub mod mock;
pub mod pages;

#[cfg(feature = "sns")]
pub mod sns;

pub use ensurer::{EnsureOutcome, SubscriptionEnsurer};
pub use error::NotifyError;
pub use pages::subscription_pages;

pub type Result<T> = std::result::Result<T, NotifyError>;

/// One page of a topic's subscription listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubscriptionPage {
    pub subscriptions: Vec<Subscription>,
    /// Present while more pages remain
    pub next_token: Option<String>,
}

/// Trait for the remote notification service that owns topics and subscriptions
#[async_trait]
pub trait NotificationService: Send + Sync {
    /// Name of the backend, for logs
    fn name(&self) -> &str;

    /// Fetch one page of subscriptions bound to `topic_arn`.
    /// `next_token` is `None` for the first page.
    async fn list_subscriptions_by_topic(
        &self,
        topic_arn: &str,
        next_token: Option<&str>,
    ) -> Result<SubscriptionPage>;

    /// Request a new subscription. Returns the subscription identifier the
    /// service reported, if any.
    async fn subscribe(&self, request: &SubscribeRequest) -> Result<Option<String>>;
}
