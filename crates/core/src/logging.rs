//! Logging infrastructure for the PDF search CLI.
//!
//! All logs are emitted to stderr so answers printed on stdout stay clean.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::{AppError, AppResult};

/// Level used when neither `RUST_LOG` nor a CLI flag picks one.
///
/// Kept quiet so log lines do not interleave with the interactive prompt.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Initialize the tracing subscriber with stderr output.
///
/// # Arguments
/// * `log_level` - Optional filter override (e.g., "debug", "pdfsearch=info")
/// * `no_color` - Disable colored output
///
/// # Example
/// ```no_run
/// use pdfsearch_core::logging::init_logging;
///
/// init_logging(None, false).expect("Failed to initialize logging");
/// ```
pub fn init_logging(log_level: Option<&str>, no_color: bool) -> AppResult<()> {
    let env_filter = EnvFilter::try_new(filter_directive(log_level))
        .map_err(|e| AppError::Config(format!("Invalid log filter: {}", e)))?;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_ansi(!no_color && std::env::var_os("NO_COLOR").is_none());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| AppError::Config(format!("Failed to init logging: {}", e)))?;

    Ok(())
}

fn filter_directive(log_level: Option<&str>) -> &str {
    match log_level {
        Some(level) if !level.trim().is_empty() => level,
        _ => DEFAULT_LOG_LEVEL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directive_default() {
        assert_eq!(filter_directive(None), "warn");
        assert_eq!(filter_directive(Some("")), "warn");
        assert_eq!(filter_directive(Some("debug")), "debug");
    }

    #[test]
    fn test_invalid_filter_rejected() {
        let result = init_logging(Some("pdfsearch=loud"), true);
        assert!(matches!(result, Err(AppError::Config(_))));
    }
}
