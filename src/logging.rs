//! Tracing setup. The TUI owns the terminal, so everything goes to a file.

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

const LOG_DIR: &str = ".logs";
const LOG_FILE_PREFIX: &str = "recipe-rs";
const DEFAULT_FILTER: &str = "recipe_rs=debug,reqwest=info,warn";

/// Start writing logs to `.logs/recipe-rs.YYYY-MM-DD`, rotated daily.
///
/// `RUST_LOG` overrides [`DEFAULT_FILTER`].
pub fn init_logging() -> anyhow::Result<()> {
    std::fs::create_dir_all(LOG_DIR)?;

    let appender = RollingFileAppender::new(Rotation::DAILY, LOG_DIR, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    // Dropping the guard stops the writer thread
    Box::leak(Box::new(guard));

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_span_events(FmtSpan::CLOSE),
        )
        .init();

    tracing::info!(dir = LOG_DIR, "Logging to file");
    Ok(())
}

/// Log the result of an AI service request and how long it took.
///
/// `$started` is the `std::time::Instant` taken before the request was sent.
#[macro_export]
macro_rules! log_api_result {
    ($operation:expr, $result:expr, $started:expr) => {
        let elapsed_ms = $started.elapsed().as_millis() as u64;
        match &$result {
            Ok(_) => tracing::info!(operation = $operation, elapsed_ms, "API request successful"),
            Err(e) => {
                tracing::error!(operation = $operation, elapsed_ms, error = %e, "API request failed")
            }
        }
    };
}

/// Log an AI service request with additional context
#[macro_export]
macro_rules! log_api_request {
    ($operation:expr, $($field:tt)*) => {
        tracing::debug!(operation = $operation, $($field)*, "API request started");
    };
}

#[cfg(test)]
mod tests {
    use tracing_subscriber::EnvFilter;

    use super::DEFAULT_FILTER;

    #[test]
    fn default_filter_parses() {
        let filter = EnvFilter::try_new(DEFAULT_FILTER).unwrap();
        assert!(filter.to_string().contains("recipe_rs=debug"));
    }
}
