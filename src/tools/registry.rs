//! Tool registry with JSON schemas
//!
//! Maintains the registry of adapter-backed tools with their argument
//! schemas.
//!
//! Tools:
//! - list_bookings: List bookings from Cal.com

use crate::tools::bookings::{LIST_BOOKINGS, LIST_BOOKINGS_DESCRIPTION};
use crate::tools::types::{ListBookingsArgs, ToolSchema};
use std::collections::BTreeMap;

/// Tool registry
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    /// Map of tool name to schema
    tools: BTreeMap<String, ToolSchema>,
}

impl ToolRegistry {
    /// Create new tool registry with all tools
    pub fn new() -> Self {
        let mut registry = Self {
            tools: BTreeMap::new(),
        };

        registry.register_list_bookings();

        registry
    }

    fn register_list_bookings(&mut self) {
        let parameters = serde_json::to_value(schemars::schema_for!(ListBookingsArgs))
            .unwrap_or_else(|_| serde_json::json!({ "type": "object" }));

        let schema = ToolSchema::new(LIST_BOOKINGS, LIST_BOOKINGS_DESCRIPTION, parameters, true);
        self.tools.insert(LIST_BOOKINGS.to_string(), schema);
    }

    /// Get tool schema by name
    pub fn get(&self, name: &str) -> Option<&ToolSchema> {
        self.tools.get(name)
    }

    /// Check if tool exists
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Get all tool names, sorted
    pub fn tool_names(&self) -> Vec<String> {
        self.tools.keys().cloned().collect()
    }

    /// Get all tool schemas
    pub fn schemas(&self) -> Vec<&ToolSchema> {
        self.tools.values().collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
