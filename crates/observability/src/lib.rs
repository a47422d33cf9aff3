//! Tracing/logging initialization shared by whatever process embeds the
//! store (a server binary, a test harness).

use tracing_subscriber::EnvFilter;

/// Initialize process-wide tracing with the default `info` floor.
///
/// Safe to call multiple times; subsequent calls are no-ops.
pub fn init() {
    init_with_default("info");
}

/// Initialize tracing with an explicit fallback directive.
///
/// `RUST_LOG` still wins when set. JSON logs with timestamps, mutation and
/// import events carry the record ids involved.
pub fn init_with_default(directive: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive.to_string()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}
