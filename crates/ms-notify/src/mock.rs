//! In-memory notification service used by tests and local runs.
//!
//! Subscriptions are held as fixed pages; page `n > 0` is addressed by the
//! continuation token `page-n`. Every call is recorded.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;

use ms_common::{SubscribeRequest, Subscription, PENDING_CONFIRMATION};

use crate::{NotificationService, NotifyError, Result, SubscriptionPage};

/// Identifier SNS returns from a subscribe call that still needs confirmation
pub const SUBSCRIBE_PENDING_RESPONSE: &str = "pending confirmation";

pub struct InMemoryNotificationService {
    topic_arn: Option<String>,
    pages: Mutex<Vec<Vec<Subscription>>>,
    list_calls: Mutex<Vec<Option<String>>>,
    subscribe_calls: Mutex<Vec<SubscribeRequest>>,
    fail_list_page: Mutex<Option<usize>>,
    fail_subscribe: AtomicBool,
}

impl InMemoryNotificationService {
    /// A service holding `pages`, answering for any topic.
    pub fn with_pages(pages: Vec<Vec<Subscription>>) -> Self {
        Self {
            topic_arn: None,
            pages: Mutex::new(pages),
            list_calls: Mutex::new(Vec::new()),
            subscribe_calls: Mutex::new(Vec::new()),
            fail_list_page: Mutex::new(None),
            fail_subscribe: AtomicBool::new(false),
        }
    }

    /// A service that only knows `topic_arn`; other topics fail to list.
    pub fn for_topic(topic_arn: impl Into<String>, pages: Vec<Vec<Subscription>>) -> Self {
        Self {
            topic_arn: Some(topic_arn.into()),
            ..Self::with_pages(pages)
        }
    }

    /// Fail the listing request for the page at `index` (0-based).
    pub fn fail_list_on_page(&self, index: usize) {
        *self.fail_list_page.lock() = Some(index);
    }

    pub fn fail_subscribe(&self, fail: bool) {
        self.fail_subscribe.store(fail, Ordering::SeqCst);
    }

    /// Continuation tokens of every listing request, in call order
    pub fn list_calls(&self) -> Vec<Option<String>> {
        self.list_calls.lock().clone()
    }

    pub fn subscribe_calls(&self) -> Vec<SubscribeRequest> {
        self.subscribe_calls.lock().clone()
    }

    fn page_index(topic_arn: &str, next_token: Option<&str>) -> Result<usize> {
        let Some(token) = next_token else {
            return Ok(0);
        };
        token
            .strip_prefix("page-")
            .and_then(|n| n.parse().ok())
            .ok_or_else(|| NotifyError::List {
                topic_arn: topic_arn.to_string(),
                message: format!("InvalidParameter: invalid NextToken {}", token),
            })
    }
}

#[async_trait]
impl NotificationService for InMemoryNotificationService {
    fn name(&self) -> &str {
        "in-memory"
    }

    async fn list_subscriptions_by_topic(
        &self,
        topic_arn: &str,
        next_token: Option<&str>,
    ) -> Result<SubscriptionPage> {
        self.list_calls.lock().push(next_token.map(str::to_string));

        if self.topic_arn.as_deref().is_some_and(|known| known != topic_arn) {
            return Err(NotifyError::List {
                topic_arn: topic_arn.to_string(),
                message: "NotFound: Topic does not exist".to_string(),
            });
        }

        let index = Self::page_index(topic_arn, next_token)?;
        if *self.fail_list_page.lock() == Some(index) {
            return Err(NotifyError::List {
                topic_arn: topic_arn.to_string(),
                message: "InternalError: simulated service failure".to_string(),
            });
        }

        let pages = self.pages.lock();
        let subscriptions = pages.get(index).cloned().unwrap_or_default();
        let next_token = (index + 1 < pages.len()).then(|| format!("page-{}", index + 1));

        debug!(topic_arn = %topic_arn, page = index, count = subscriptions.len(), "Listed in-memory subscriptions");

        Ok(SubscriptionPage {
            subscriptions,
            next_token,
        })
    }

    async fn subscribe(&self, request: &SubscribeRequest) -> Result<Option<String>> {
        self.subscribe_calls.lock().push(request.clone());

        if self.fail_subscribe.load(Ordering::SeqCst) {
            return Err(NotifyError::Subscribe {
                topic_arn: request.topic_arn.clone(),
                endpoint: request.endpoint.clone(),
                message: "AuthorizationError: simulated denial".to_string(),
            });
        }

        let subscription = Subscription {
            protocol: request.protocol.clone(),
            endpoint: request.endpoint.clone(),
            topic_arn: request.topic_arn.clone(),
            subscription_arn: Some(PENDING_CONFIRMATION.to_string()),
            owner: None,
        };

        let mut pages = self.pages.lock();
        match pages.last_mut() {
            Some(last) => last.push(subscription),
            None => pages.push(vec![subscription]),
        }

        Ok(Some(SUBSCRIBE_PENDING_RESPONSE.to_string()))
    }
}
