use lambda_runtime::LambdaEvent;
use tracing::{info, info_span, Instrument};

use ms_common::ButtonEvent;
use ms_notify::{EnsureOutcome, NotifyError, SubscriptionEnsurer};

/// Subscribe the event's email address to the configured topic.
///
/// The email always comes from the event payload; the click type is only logged.
pub async fn handle(
    ensurer: &SubscriptionEnsurer,
    event: LambdaEvent<ButtonEvent>,
) -> Result<EnsureOutcome, NotifyError> {
    let (payload, context) = event.into_parts();
    let span = info_span!("invocation", request_id = %context.request_id);

    async move {
        info!(
            click_type = %payload.click_type.map(|c| c.to_string()).unwrap_or_default(),
            serial_number = payload.serial_number.as_deref().unwrap_or("-"),
            "Received event"
        );
        info!(email = %payload.email, "Email for subscription");

        ensurer.ensure(&payload.email).await
    }
    .instrument(span)
    .await
}
