//! Tool argument and result types
//!
//! Argument records are serialized verbatim as the adapter's JSON payload,
//! so field order and omission rules here are part of the adapter contract.

use schemars::JsonSchema;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Page size used when the caller does not pass `limit`
pub const DEFAULT_LIMIT: i64 = 10;

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

/// Accept `10`, `10.0` and `"10"` as a limit; reject fractions and words
fn deserialize_limit<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawLimit {
        Integer(i64),
        Float(f64),
        Text(String),
    }

    match RawLimit::deserialize(deserializer)? {
        RawLimit::Integer(limit) => Ok(limit),
        RawLimit::Float(limit)
            if limit.fract() == 0.0 && limit >= i64::MIN as f64 && limit < i64::MAX as f64 =>
        {
            Ok(limit as i64)
        }
        RawLimit::Float(limit) => Err(D::Error::custom(format!(
            "limit must be a whole number, got {}",
            limit
        ))),
        RawLimit::Text(text) => text.trim().parse().map_err(|_| {
            D::Error::custom(format!("limit must be a whole number, got {:?}", text))
        }),
    }
}

/// Booking status filter accepted by `list_bookings`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Upcoming,
    Recurring,
    Past,
    Cancelled,
    Unconfirmed,
}

impl BookingStatus {
    /// All accepted values, in schema order
    pub const ALL: [BookingStatus; 5] = [
        BookingStatus::Upcoming,
        BookingStatus::Recurring,
        BookingStatus::Past,
        BookingStatus::Cancelled,
        BookingStatus::Unconfirmed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Upcoming => "upcoming",
            BookingStatus::Recurring => "recurring",
            BookingStatus::Past => "past",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Unconfirmed => "unconfirmed",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Arguments of the `list_bookings` tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ListBookingsArgs {
    /// Maximum number of bookings to return
    #[serde(default = "default_limit", deserialize_with = "deserialize_limit")]
    pub limit: i64,

    /// Only return bookings with this status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<BookingStatus>,
}

impl Default for ListBookingsArgs {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            status: None,
        }
    }
}

impl ListBookingsArgs {
    pub fn new(limit: i64, status: Option<BookingStatus>) -> Self {
        Self { limit, status }
    }
}

/// Outcome of one adapter-backed tool call
///
/// Every variant renders to the single string handed back to the caller;
/// nothing here is ever raised as a protocol error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolOutcome {
    /// Adapter exited 0; stdout with surrounding whitespace trimmed
    Output(String),

    /// Adapter exited non-zero; stderr exactly as captured
    AdapterFailed { stderr: String },

    /// Anything else that went wrong around the invocation
    Unexpected(String),
}

impl ToolOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ToolOutcome::Output(_))
    }

    /// Render into the text returned to the caller
    pub fn into_text(self) -> String {
        match self {
            ToolOutcome::Output(text) => text,
            other => other.to_string(),
        }
    }
}

impl fmt::Display for ToolOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolOutcome::Output(text) => f.write_str(text),
            ToolOutcome::AdapterFailed { stderr } => write!(f, "Error executing tool: {}", stderr),
            ToolOutcome::Unexpected(message) => write!(f, "Unexpected error: {}", message),
        }
    }
}

/// Tool schema definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSchema {
    /// Tool name
    pub name: String,

    /// Tool description
    pub description: String,

    /// Parameter schema (JSON Schema)
    pub parameters: serde_json::Value,

    /// Whether the tool only reads remote state
    pub read_only: bool,
}

impl ToolSchema {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: serde_json::Value,
        read_only: bool,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
            read_only,
        }
    }
}
