//! Tracing setup. Logs always go to stderr; stdout is reserved for command
//! output so it can be piped.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::LogFormatArg;

/// Installs the global subscriber. `RUST_LOG`, when set, wins over
/// `default_level`. Call once.
pub fn init_logging(default_level: &str, format: LogFormatArg) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormatArg::Pretty => registry
            .with(fmt::layer().with_writer(std::io::stderr).without_time())
            .init(),
        LogFormatArg::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
    }

    tracing::trace!(?format, "logging initialized");
}
