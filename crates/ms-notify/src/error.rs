use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotifyError {
    #[error("Failed to list subscriptions for {topic_arn}: {message}")]
    List { topic_arn: String, message: String },

    #[error("Failed to subscribe {endpoint} to {topic_arn}: {message}")]
    Subscribe {
        topic_arn: String,
        endpoint: String,
        message: String,
    },
}
