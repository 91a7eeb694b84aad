//! Tracing subscriber bootstrap.

use anyhow::Context;
use bookshelf_kernel::settings::{LogFormat, TelemetrySettings};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured filter. Calling this
/// twice fails because a global subscriber is already set.
pub fn init(settings: &TelemetrySettings) -> anyhow::Result<()> {
    let filter = env_filter(settings)?;
    let registry = tracing_subscriber::registry().with(filter);

    match settings.log_format {
        LogFormat::Pretty => registry
            .with(fmt::layer().with_target(true))
            .try_init()
            .context("failed to install pretty tracing subscriber")?,
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(true))
            .try_init()
            .context("failed to install json tracing subscriber")?,
    }

    tracing::info!(
        target: "bookshelf-telemetry",
        format = ?settings.log_format,
        "telemetry initialized"
    );
    Ok(())
}

fn env_filter(settings: &TelemetrySettings) -> anyhow::Result<EnvFilter> {
    let from_env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    filter_from(from_env.as_deref(), &settings.filter)
}

fn filter_from(from_env: Option<&str>, configured: &str) -> anyhow::Result<EnvFilter> {
    let directives = from_env.filter(|value| !value.trim().is_empty()).unwrap_or(configured);
    EnvFilter::try_new(directives).with_context(|| format!("invalid log filter '{}'", directives))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn environment_directives_take_precedence() {
        let filter = filter_from(Some("debug"), "info").unwrap();
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn blank_environment_falls_back_to_configured_filter() {
        let filter = filter_from(Some("  "), "warn").unwrap();
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn invalid_directive_is_reported() {
        let err = filter_from(None, "bookshelf=loud").unwrap_err();
        assert!(err.to_string().contains("bookshelf=loud"));
    }
}
