//! SNS Integration Tests
//!
//! These tests require LocalStack to be running:
//! docker run -d -p 4566:4566 localstack/localstack
//!
//! Tests for:
//! - Subscribing a new email endpoint
//! - Idempotence against an existing subscription
//! - Failure on an unknown topic

#![cfg(feature = "sns")]

use std::sync::Arc;
use std::time::Duration;

use aws_config::{BehaviorVersion, Region};
use aws_sdk_sns::Client;

use ms_config::NotificationConfig;
use ms_notify::sns::SnsNotificationService;
use ms_notify::{NotificationService, NotifyError, SubscriptionEnsurer};

const LOCALSTACK_ENDPOINT: &str = "http://localhost:4566";
const REGION: &str = "us-east-1";

async fn create_test_client() -> Client {
    let config = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(REGION))
        .endpoint_url(LOCALSTACK_ENDPOINT)
        .load()
        .await;

    Client::new(&config)
}

fn create_test_service(client: Client) -> Arc<SnsNotificationService> {
    Arc::new(SnsNotificationService::new(client))
}

async fn setup_test_topic(client: &Client, name: &str) -> String {
    let result = client
        .create_topic()
        .name(name)
        .send()
        .await
        .expect("Failed to create topic");

    result.topic_arn().unwrap().to_string()
}

/// Check if LocalStack is available
async fn is_localstack_available() -> bool {
    let client = reqwest::Client::new();
    let result = client
        .get(format!("{}/_localstack/health", LOCALSTACK_ENDPOINT))
        .timeout(Duration::from_secs(2))
        .send()
        .await;

    match result {
        Ok(resp) => resp.status().is_success(),
        Err(_) => false,
    }
}

#[tokio::test]
async fn test_subscribe_new_email() {
    if !is_localstack_available().await {
        eprintln!("Skipping test - LocalStack not available");
        return;
    }

    let client = create_test_client().await;
    let topic_arn = setup_test_topic(&client, "mailsub-new-email").await;
    let service = create_test_service(client);
    let ensurer = SubscriptionEnsurer::new(service.clone(), topic_arn.clone());

    let email = "new-email@example.com";
    let outcome = ensurer.ensure(email).await.expect("Ensure failed");
    assert!(outcome.was_requested());

    let existing = ensurer
        .find_existing_subscription(&topic_arn, email)
        .await
        .expect("List failed");
    assert_eq!(existing.map(|s| s.endpoint), Some(email.to_string()));
}

#[tokio::test]
async fn test_second_ensure_is_noop() {
    if !is_localstack_available().await {
        eprintln!("Skipping test - LocalStack not available");
        return;
    }

    let client = create_test_client().await;
    let topic_arn = setup_test_topic(&client, "mailsub-idempotent").await;
    let service = create_test_service(client);
    let ensurer = SubscriptionEnsurer::new(service.clone(), topic_arn.clone());

    let email = "repeat@example.com";
    ensurer.ensure(email).await.expect("First ensure failed");
    let second = ensurer.ensure(email).await.expect("Second ensure failed");
    assert!(!second.was_requested());

    let page = service
        .list_subscriptions_by_topic(&topic_arn, None)
        .await
        .expect("List failed");
    let matching = page
        .subscriptions
        .iter()
        .filter(|s| s.endpoint == email)
        .count();
    assert_eq!(matching, 1);
}

#[tokio::test]
async fn test_unknown_topic_fails_to_list() {
    if !is_localstack_available().await {
        eprintln!("Skipping test - LocalStack not available");
        return;
    }

    let config = NotificationConfig {
        topic_arn: format!("arn:aws:sns:{}:000000000000:mailsub-missing", REGION),
        region: Some(REGION.to_string()),
        endpoint_url: Some(LOCALSTACK_ENDPOINT.to_string()),
    };
    let service = Arc::new(SnsNotificationService::from_env(&config).await);
    let ensurer = SubscriptionEnsurer::new(service, config.topic_arn.clone());

    let result = ensurer.ensure("nobody@example.com").await;
    assert!(matches!(result, Err(NotifyError::List { .. })));
}
