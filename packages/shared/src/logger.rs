//! Logging setup utilities for the Kaigi packages.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the specified default log level.
///
/// The filter covers the library crates and the binary itself. The log level
/// can be overridden using the `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `binary_name` - The name of the binary (e.g., "kaigi-server")
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn", "error")
///
/// # Examples
///
/// ```no_run
/// use kaigi_shared::logger::setup_logger;
///
/// setup_logger("kaigi-server", "debug");
/// ```
pub fn setup_logger(binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(binary_name, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build the default filter directive used when `RUST_LOG` is not set.
fn default_filter(binary_name: &str, default_log_level: &str) -> String {
    format!(
        "kaigi_shared={level},kaigi_server={level},{binary}={level},tower_http={level}",
        level = default_log_level,
        binary = binary_name.replace('-', "_"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_covers_binary_and_crates() {
        // テスト項目: デフォルトのフィルタにバイナリ名とクレート名が含まれる
        // given (前提条件):
        let binary_name = "kaigi-server";

        // when (操作):
        let filter = default_filter(binary_name, "info");

        // then (期待する結果):
        assert!(filter.contains("kaigi_server=info"));
        assert!(filter.contains("kaigi_shared=info"));
        assert!(filter.contains("tower_http=info"));
        assert!(!filter.contains("kaigi-server"));
    }
}
