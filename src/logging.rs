// ==========================================
// Logging setup
// ==========================================
// tracing + tracing-subscriber
// Level comes from the environment
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

pub const LOG_JSON_ENV: &str = "ROTEIRO_PCP_LOG_JSON";

/// Installs the global subscriber
///
/// # Environment
/// - RUST_LOG: level filter (default: info)
///   e.g. RUST_LOG=debug or RUST_LOG=roteiro_pcp=trace
/// - ROTEIRO_PCP_LOG_JSON=1: one JSON object per event
///
/// # Example
/// ```no_run
/// use roteiro_pcp::logging;
/// logging::init();
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true)
        .with_writer(std::io::stderr);

    if json_requested() {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn json_requested() -> bool {
    std::env::var(LOG_JSON_ENV)
        .map(|v| matches!(v.trim(), "1" | "true"))
        .unwrap_or(false)
}

/// Test subscriber, debug level, captured by the test harness
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
