//! Error types for calcom-mcp
//!
//! Library-level errors. Tool calls never surface these to MCP clients:
//! the adapter layer folds them into the `Unexpected error:` template.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the server and its adapter plumbing
#[derive(Error, Debug)]
pub enum ServerError {
    /// The adapter binary could not be started or awaited
    #[error("failed to run adapter {path}: {source}")]
    AdapterSpawn {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Adapter wrote something that is not UTF-8 text
    #[error("adapter produced non-UTF-8 {stream}: {source}")]
    AdapterOutputEncoding {
        stream: &'static str,
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// No tool with this name is registered
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Tool arguments did not match the tool's schema
    #[error("Invalid arguments for {tool}: {reason}")]
    InvalidArguments { tool: String, reason: String },

    /// Serialization errors
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type alias for server operations
pub type Result<T> = std::result::Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adapter_spawn_display() {
        let err = ServerError::AdapterSpawn {
            path: PathBuf::from("/opt/calcom/adapter"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "No such file or directory"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/opt/calcom/adapter"));
        assert!(msg.contains("No such file or directory"));
    }

    #[test]
    fn test_invalid_arguments_display() {
        let err = ServerError::InvalidArguments {
            tool: "list_bookings".to_string(),
            reason: "unknown variant `pending`".to_string(),
        };
        assert!(err.to_string().contains("list_bookings"));
        assert!(err.to_string().contains("pending"));
    }
}
