//! calcom-mcp - Cal.com bookings as MCP tools
//!
//! Serves the `list_bookings` tool over MCP (stdio). Each call is forwarded
//! to the compiled adapter binary as `adapter list_bookings <json>`, and the
//! adapter's stdout (or a formatted error) comes back as the tool result.
//!
//! # Layout
//!
//! - `tools`: argument types, adapter invocation, registry, executor
//! - `server`: rmcp server handler
//! - `cli`: arguments and TOML configuration
//! - `doctor`: adapter/credential diagnostics
//! - `telemetry`: tracing setup

pub mod errors;
pub mod tools;
pub mod server;
pub mod cli;
pub mod doctor;
pub mod telemetry;

// Re-export commonly used types
pub use errors::{ServerError, Result};
pub use server::{CalcomServer, ServerIdentity};
