// src/logging.rs

//! Logging setup for `compilerun` using `tracing` + `tracing-subscriber`.
//!
//! The filter comes from, in order:
//! 1. `--log-level` CLI flag (a plain level for every target)
//! 2. `COMPILERUN_LOG`, any `EnvFilter` directive string
//!    (e.g. "debug" or "compilerun::exec=trace,info")
//! 3. `info`
//!
//! Logs go to stderr; stdout is reserved for the compiler's own output.

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::LogLevel;

const LOG_ENV: &str = "COMPILERUN_LOG";
const DEFAULT_DIRECTIVES: &str = "info";

/// Initialise the global subscriber. Call once, from `main`.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let env_value = std::env::var(LOG_ENV).ok();
    let directives = resolve_directives(cli_level, env_value.as_deref());
    let filter = EnvFilter::try_new(&directives)
        .with_context(|| format!("invalid log filter {directives:?}"))?;

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

/// Filter directives for the subscriber.
///
/// An unparsable `COMPILERUN_LOG` falls back to the default rather than
/// failing startup.
pub fn resolve_directives(cli_level: Option<LogLevel>, env_value: Option<&str>) -> String {
    if let Some(level) = cli_level {
        return level_directive(level).to_string();
    }

    match env_value.map(str::trim) {
        Some(value) if !value.is_empty() && EnvFilter::try_new(value).is_ok() => value.to_string(),
        _ => DEFAULT_DIRECTIVES.to_string(),
    }
}

fn level_directive(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    }
}
