//! Bookings tools backed by the adapter

use crate::tools::adapter::Adapter;
use crate::tools::types::{ListBookingsArgs, ToolOutcome};

/// Tool name, also the adapter's first positional argument
pub const LIST_BOOKINGS: &str = "list_bookings";

pub const LIST_BOOKINGS_DESCRIPTION: &str = "List bookings from Cal.com";

/// List bookings through the adapter
///
/// Never fails: adapter errors come back as the `Error executing tool:` /
/// `Unexpected error:` strings inside the outcome.
pub async fn list_bookings(adapter: &Adapter, args: &ListBookingsArgs) -> ToolOutcome {
    adapter.call_tool(LIST_BOOKINGS, args).await
}
