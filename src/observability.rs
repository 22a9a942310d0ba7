//! Process-wide tracing setup driven by the `observability` config section.
//!
//! `log_level` seeds the filter unless `RUST_LOG` is set; `json_logs` picks the
//! output format unless `CEJUSC_LOG_FORMAT` names one.

use std::sync::OnceLock;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::types::ObservabilityConfig;

/// Environment variable that overrides `json_logs` (`json` or `compact`).
pub const LOG_FORMAT_ENV: &str = "CEJUSC_LOG_FORMAT";

static TRACING_INIT: OnceLock<()> = OnceLock::new();

/// Install the subscriber described by `config`. Later calls are no-ops.
pub fn init_tracing(config: &ObservabilityConfig) {
    TRACING_INIT.get_or_init(|| {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
        let json = wants_json(config, std::env::var(LOG_FORMAT_ENV).ok().as_deref());

        let result = if json {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json())
                .try_init()
        } else {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().compact())
                .try_init()
        };

        if let Err(err) = result {
            eprintln!("tracing init skipped: {err}");
        }
    });
}

/// The env value wins when it names a format; otherwise `json_logs` decides.
fn wants_json(config: &ObservabilityConfig, format_env: Option<&str>) -> bool {
    match format_env.map(str::trim) {
        Some(v) if v.eq_ignore_ascii_case("json") => true,
        Some(v) if v.eq_ignore_ascii_case("compact") => false,
        _ => config.json_logs,
    }
}
