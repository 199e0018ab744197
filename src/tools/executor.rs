//! Tool executor
//!
//! Routes a tool name plus untyped JSON arguments to the matching typed
//! handler. Used by the `call` subcommand; the MCP server gets typed
//! arguments from the framework and calls the handlers directly.

use crate::errors::{Result, ServerError};
use crate::tools::adapter::Adapter;
use crate::tools::bookings::{self, LIST_BOOKINGS};
use crate::tools::registry::ToolRegistry;
use crate::tools::types::{ListBookingsArgs, ToolOutcome};
use serde::de::DeserializeOwned;
use tracing::info;

pub struct ToolExecutor {
    adapter: Adapter,
    registry: ToolRegistry,
}

impl ToolExecutor {
    pub fn new(adapter: Adapter) -> Self {
        Self {
            adapter,
            registry: ToolRegistry::new(),
        }
    }

    /// Execute a tool once
    ///
    /// Unknown tools and malformed arguments are errors; everything that
    /// happens once the adapter is involved is reported in the outcome.
    pub async fn execute(&self, tool: &str, args: &serde_json::Value) -> Result<ToolOutcome> {
        if !self.registry.contains(tool) {
            return Err(ServerError::UnknownTool(tool.to_string()));
        }

        info!(tool, "executing tool");

        match tool {
            LIST_BOOKINGS => {
                let args: ListBookingsArgs = decode_args(tool, args)?;
                Ok(bookings::list_bookings(&self.adapter, &args).await)
            }
            _ => Err(ServerError::UnknownTool(tool.to_string())),
        }
    }
}

fn decode_args<T: DeserializeOwned>(tool: &str, args: &serde_json::Value) -> Result<T> {
    // A missing argument object means "all defaults"
    let args = if args.is_null() {
        serde_json::Value::Object(Default::default())
    } else {
        args.clone()
    };

    serde_json::from_value(args).map_err(|e| ServerError::InvalidArguments {
        tool: tool.to_string(),
        reason: e.to_string(),
    })
}
