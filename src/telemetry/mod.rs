//! Logging setup for calcom-mcp
//!
//! stdout carries the MCP JSON-RPC stream, so every log line goes to stderr.

use tracing_subscriber::EnvFilter;

/// Build the log filter: `RUST_LOG` when set, otherwise `level`
pub fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Install the global subscriber
///
/// Safe to call more than once; later calls are ignored.
pub fn init(level: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(level))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .try_init();
}
