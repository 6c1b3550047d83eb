//! Logging setup controlled by environment variables.
//!
//! The library itself only emits `tracing` events: `debug` when a connection
//! string is decoded and `trace` when one is encoded. Credentials and options
//! are never logged. Applications that have no subscriber of their own can
//! call [`init`] (requires the `tracing-subscriber` feature).
//!
//! # Environment Variables
//!
//! - `PGURL_DEBUG=true` - Enable debug logging
//! - `PGURL_DEBUG=1` - Enable debug logging
//! - `PGURL_LOG_LEVEL=debug|info|warn|error|trace` - Set specific log level
//! - `PGURL_LOG_FORMAT=json|pretty|compact` - Set output format (default: json)
//!
//! # Usage
//!
//! ```rust,no_run
//! use pgurl::logging;
//!
//! // Initialize logging (call once at startup)
//! logging::init();
//! ```

use crate::connection::{EnvSource, StdEnvSource};
use std::sync::Once;

/// Enables debug logging when set to `true`, `1` or `yes`.
pub const DEBUG_VAR: &str = "PGURL_DEBUG";
/// Overrides the log level.
pub const LOG_LEVEL_VAR: &str = "PGURL_LOG_LEVEL";
/// Selects the output format.
pub const LOG_FORMAT_VAR: &str = "PGURL_LOG_FORMAT";

static INIT: Once = Once::new();

/// Check if debug logging is enabled in `source`.
pub fn is_debug_enabled_in<S: EnvSource + ?Sized>(source: &S) -> bool {
    source
        .get(DEBUG_VAR)
        .map(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "yes"))
        .unwrap_or(false)
}

/// Check if debug logging is enabled via `PGURL_DEBUG`.
#[inline]
pub fn is_debug_enabled() -> bool {
    is_debug_enabled_in(&StdEnvSource)
}

/// Resolve the log level from `source`.
///
/// Defaults to "debug" if `PGURL_DEBUG` is enabled, otherwise "warn".
pub fn log_level_in<S: EnvSource + ?Sized>(source: &S) -> &'static str {
    let fallback = if is_debug_enabled_in(source) {
        "debug"
    } else {
        "warn"
    };

    match source.get(LOG_LEVEL_VAR) {
        Some(level) => match level.to_lowercase().as_str() {
            "trace" => "trace",
            "debug" => "debug",
            "info" => "info",
            "warn" => "warn",
            "error" => "error",
            _ => fallback,
        },
        None => fallback,
    }
}

/// Get the configured log level from `PGURL_LOG_LEVEL`.
pub fn get_log_level() -> &'static str {
    log_level_in(&StdEnvSource)
}

/// Resolve the log format from `source`. Defaults to "json".
pub fn log_format_in<S: EnvSource + ?Sized>(source: &S) -> &'static str {
    source
        .get(LOG_FORMAT_VAR)
        .map(|f| match f.to_lowercase().as_str() {
            "pretty" => "pretty",
            "compact" => "compact",
            _ => "json",
        })
        .unwrap_or("json")
}

/// Get the configured log format from `PGURL_LOG_FORMAT`.
pub fn get_log_format() -> &'static str {
    log_format_in(&StdEnvSource)
}

/// Initialize the pgurl logging system.
///
/// Subsequent calls are no-ops. Nothing is installed unless `PGURL_DEBUG` or
/// `PGURL_LOG_LEVEL` is set.
pub fn init() {
    INIT.call_once(|| {
        let source = StdEnvSource;
        if !is_debug_enabled_in(&source) && !source.contains(LOG_LEVEL_VAR) {
            return;
        }

        #[cfg(feature = "tracing-subscriber")]
        {
            use tracing_subscriber::{EnvFilter, fmt, prelude::*};

            let level = log_level_in(&source);
            let filter = EnvFilter::try_new(format!("pgurl={level}"))
                .unwrap_or_else(|_| EnvFilter::new("warn"));

            // try_init: the host application may already own a subscriber.
            let installed = match log_format_in(&source) {
                "json" => tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt::layer().json())
                    .try_init(),
                "compact" => tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt::layer().compact())
                    .try_init(),
                _ => tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt::layer().pretty())
                    .try_init(),
            };

            if installed.is_ok() {
                tracing::info!(
                    level = level,
                    format = log_format_in(&source),
                    "pgurl logging initialized"
                );
            }
        }
    });
}
