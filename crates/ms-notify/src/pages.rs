//! Lazy pagination over a topic's subscriptions.
//!
//! The stream issues the next listing request only when polled and ends
//! once a page comes back without a continuation token. A failed request is
//! yielded as the stream's last item.

use futures::stream::{self, Stream};

use crate::{NotificationService, NotifyError, Result, SubscriptionPage};

enum Cursor {
    Start,
    Next(String),
    Done,
}

/// Stream every page of subscriptions bound to `topic_arn`, in service order.
pub fn subscription_pages<'a>(
    service: &'a dyn NotificationService,
    topic_arn: &'a str,
) -> impl Stream<Item = Result<SubscriptionPage>> + Send + 'a {
    stream::try_unfold(Cursor::Start, move |cursor| async move {
        let token = match cursor {
            Cursor::Done => return Ok(None),
            Cursor::Start => None,
            Cursor::Next(token) => Some(token),
        };

        let page = service
            .list_subscriptions_by_topic(topic_arn, token.as_deref())
            .await?;

        // An empty token means the same as none
        let next = match page.next_token.as_deref() {
            Some(t) if !t.is_empty() => Cursor::Next(t.to_string()),
            _ => Cursor::Done,
        };

        Ok::<_, NotifyError>(Some((page, next)))
    })
}
