//! Tracing initialization.

pub mod spans;

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use waymem_core::config::ObservabilityConfig;

/// Environment variable holding a full `EnvFilter` directive,
/// e.g. `WAYMEM_LOG=waymem_consolidation=debug,info`.
pub const LOG_ENV_VAR: &str = "WAYMEM_LOG";

const LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

static INIT: Once = Once::new();

/// Filter directive to use: the env directive when set, otherwise the
/// configured level raised one step per `-v`.
pub fn resolve_filter(env: Option<&str>, configured: &str, verbosity: u8) -> String {
    if let Some(directive) = env.map(str::trim).filter(|d| !d.is_empty()) {
        return directive.to_string();
    }
    let base = LEVELS
        .iter()
        .position(|level| level.eq_ignore_ascii_case(configured.trim()))
        .unwrap_or(2);
    let idx = (base + usize::from(verbosity)).min(LEVELS.len() - 1);
    LEVELS[idx].to_string()
}

/// Install the global subscriber, writing to stderr. Idempotent; later calls
/// and calls after another subscriber was installed are ignored.
pub fn init_tracing(config: &ObservabilityConfig, verbosity: u8) {
    INIT.call_once(|| {
        let env = std::env::var(LOG_ENV_VAR).ok();
        let directive = resolve_filter(env.as_deref(), &config.log_level, verbosity);
        let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("info"));

        let layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true);
        let result = if config.json {
            tracing_subscriber::registry()
                .with(layer.json().with_file(true).with_line_number(true))
                .with(filter)
                .try_init()
        } else {
            tracing_subscriber::registry()
                .with(layer)
                .with(filter)
                .try_init()
        };
        // Another subscriber already owns the process; keep it.
        let _ = result;
    });
}
