//! Adapter-backed tools
//!
//! Every tool here marshals its arguments to JSON and hands them to the
//! external adapter binary:
//! - types: argument records, outcomes and schemas
//! - adapter: subprocess invocation and outcome formatting
//! - bookings: `list_bookings`
//! - registry: tool schemas
//! - executor: name-based dispatch for local calls

pub mod types;
pub mod adapter;
pub mod bookings;
pub mod registry;
pub mod executor;

// Re-export commonly used types
pub use types::{BookingStatus, ListBookingsArgs, ToolOutcome, ToolSchema};
pub use adapter::Adapter;
pub use registry::ToolRegistry;
pub use executor::ToolExecutor;
