//! Diagnostic logging for ledit.
//!
//! Diagnostics go to stderr so they never mix with command output on stdout.
//! This is separate from the per-buffer edit log, which is a user feature
//! living in `core::log_sink`.
//!
//! ## Filter priority
//!
//! 1. **`--log <directive>`** on the command line
//! 2. **`LEDIT_LOG`** - ledit-specific control
//! 3. **`RUST_LOG`** - standard tracing environment variable
//! 4. **Default** - `warn`

use std::env;

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "warn";

/// Initialize logging.
///
/// Safe to call multiple times -- later calls leave the first subscriber in place.
pub fn init(directive: Option<&str>) {
    let filter = create_filter(directive);
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Pick the filter string by priority, see the module docs.
fn filter_directive(directive: Option<&str>) -> String {
    if let Some(directive) = directive.filter(|d| !d.trim().is_empty()) {
        return expand(directive);
    }
    if let Ok(ledit_log) = env::var("LEDIT_LOG") {
        return expand(&ledit_log);
    }
    if let Ok(rust_log) = env::var("RUST_LOG") {
        return rust_log;
    }
    DEFAULT_FILTER.to_string()
}

/// A bare level like `debug` applies to ledit only; anything with module
/// syntax is used as-is.
fn expand(directive: &str) -> String {
    if directive.contains('=') || directive.contains(',') || directive.contains(':') {
        return directive.to_string();
    }
    format!("{DEFAULT_FILTER},ledit={directive}")
}

fn create_filter(directive: Option<&str>) -> EnvFilter {
    let directive = filter_directive(directive);
    EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}
