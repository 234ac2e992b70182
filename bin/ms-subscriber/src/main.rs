//! Mailsub Subscriber Lambda
//!
//! Invoked with a button event carrying an email address; subscribes that
//! address to the configured SNS topic unless it is already subscribed.
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `MAILSUB_TOPIC_ARN` | historical acmeware topic | Topic to subscribe addresses to |
//! | `MAILSUB_AWS_REGION` | provider chain | Region override for SNS |
//! | `MAILSUB_SNS_ENDPOINT_URL` | - | Endpoint override (LocalStack) |
//! | `MAILSUB_CONFIG` | - | Path to a TOML config file |
//! | `LOG_FORMAT` | `json` in Lambda | `json` or `text` |
//! | `RUST_LOG` | `info` | Log level |

mod handler;

use std::sync::Arc;

use anyhow::{Context, Result};
use lambda_runtime::{run, service_fn, LambdaEvent};
use tracing::info;

use ms_common::ButtonEvent;
use ms_config::ConfigLoader;
use ms_notify::sns::SnsNotificationService;
use ms_notify::SubscriptionEnsurer;

#[tokio::main]
async fn main() -> Result<()> {
    ms_common::logging::init_logging("ms-subscriber");

    let config = ConfigLoader::new().load().context("loading configuration")?;
    config.validate().context("validating configuration")?;

    // One client per execution environment, reused across invocations
    let service = Arc::new(SnsNotificationService::from_env(&config.notification).await);
    let ensurer = Arc::new(SubscriptionEnsurer::new(service, config.notification.topic_arn.clone()));

    info!(topic_arn = %ensurer.topic_arn(), "Starting Mailsub subscriber");

    run(service_fn(move |event: LambdaEvent<ButtonEvent>| {
        let ensurer = Arc::clone(&ensurer);
        async move {
            handler::handle(&ensurer, event)
                .await
                .map_err(lambda_runtime::Error::from)
        }
    }))
    .await
    .map_err(anyhow::Error::msg)
}
