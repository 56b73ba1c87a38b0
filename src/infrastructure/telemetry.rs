//! Logging setup
//!
//! Installs the global `tracing` subscriber. Inside Lambda, stdout ends up
//! in CloudWatch Logs, which neither renders ANSI colours nor needs our
//! timestamps.

use tracing_subscriber::fmt::format::FmtSpan;

/// Environment variable the Lambda runtime sets in every function container.
const LAMBDA_MARKER_ENV: &str = "AWS_LAMBDA_FUNCTION_NAME";

/// Pick the log level for the process.
pub fn log_level(debug: bool) -> tracing::Level {
    if debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    }
}

/// Whether the process is running inside a Lambda container.
pub fn running_in_lambda() -> bool {
    std::env::var(LAMBDA_MARKER_ENV).is_ok()
}

/// Install the global fmt subscriber. Safe to call more than once; later
/// calls are ignored.
pub fn init(debug: bool) {
    let builder = tracing_subscriber::fmt()
        .with_max_level(log_level(debug))
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false);

    let result = if running_in_lambda() {
        builder.with_ansi(false).without_time().try_init()
    } else {
        builder.try_init()
    };

    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
