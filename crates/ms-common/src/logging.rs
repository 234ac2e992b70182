//! Structured Logging Configuration
//!
//! Provides configurable logging with:
//! - JSON output for production (LOG_FORMAT=json, or when running inside Lambda)
//! - Human-readable output for local runs (default)
//! - Context fields via spans (topic_arn, endpoint, request_id)
//!
//! # Usage
//!
//! ```rust,ignore
//! use ms_common::logging::init_logging;
//!
//! fn main() {
//!     init_logging("ms-subscriber");
//!
//!     tracing::info!(endpoint = %email, "Subscription requested");
//! }
//! ```
//!
//! # Environment Variables
//!
//! - `LOG_FORMAT`: "json" or "text". When unset, JSON is used inside Lambda
//!   (`AWS_LAMBDA_FUNCTION_NAME` present) and text everywhere else.
//! - `RUST_LOG`: Standard log level filter (default: info)
//!   Examples: `RUST_LOG=debug`, `RUST_LOG=ms_notify=trace,aws_config=warn`

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Output format selected for the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Text,
}

impl LogFormat {
    /// Resolve the format from the `LOG_FORMAT` value and whether we are
    /// running inside the Lambda execution environment.
    pub fn resolve(log_format: Option<&str>, in_lambda: bool) -> Self {
        match log_format {
            Some(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
            Some(v) if v.eq_ignore_ascii_case("text") => LogFormat::Text,
            _ if in_lambda => LogFormat::Json,
            _ => LogFormat::Text,
        }
    }

    fn from_env() -> Self {
        let log_format = std::env::var("LOG_FORMAT").ok();
        let in_lambda = std::env::var_os("AWS_LAMBDA_FUNCTION_NAME").is_some();
        Self::resolve(log_format.as_deref(), in_lambda)
    }
}

/// Initialize logging with the given service name.
///
/// Reads RUST_LOG env var for log level filtering (defaults to INFO).
pub fn init_logging(service_name: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    match LogFormat::from_env() {
        LogFormat::Json => init_json_logging(env_filter),
        LogFormat::Text => init_text_logging(env_filter),
    }

    tracing::debug!(service = %service_name, "Logging initialized");
}

/// JSON logging. CloudWatch stamps every line, so no timestamp is written.
fn init_json_logging(env_filter: EnvFilter) {
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .json()
                .without_time()
                .with_current_span(true)
                .with_span_list(false)
                .with_target(true)
                .with_ansi(false)
                .flatten_event(true)
                .with_span_events(FmtSpan::CLOSE)
        )
        .init();
}

/// Initialize human-readable text logging for development.
fn init_text_logging(env_filter: EnvFilter) {
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .with_ansi(true)
        )
        .init();
}
