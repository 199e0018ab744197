//! Command-line argument parsing for calcom-mcp
//!
//! Provides clap-based CLI with subcommands and verbosity control.

use clap::{Parser, Subcommand};
use crate::cli::config::ADAPTER_PATH_ENV;
use std::path::PathBuf;

/// calcom-mcp - Cal.com bookings as MCP tools
#[derive(Parser, Debug)]
#[command(name = "calcom-mcp")]
#[command(version)]
#[command(about = "MCP server exposing Cal.com bookings through the compiled adapter", long_about = None)]
pub struct Args {
    /// Path to the adapter binary (default: `adapter` next to this executable)
    #[arg(long, env = ADAPTER_PATH_ENV, global = true)]
    pub adapter: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level: -q (quiet), default (normal), -v (verbose), -vv (very verbose)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Subcommand (defaults to `serve`)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Serve the tools over MCP on stdio
    Serve,

    /// Run a single tool call and print its result
    Call {
        /// Tool name, e.g. list_bookings
        tool: String,

        /// Tool arguments as a JSON object
        #[arg(value_name = "ARGS_JSON")]
        args: Option<String>,
    },

    /// Print registered tools and their argument schemas as JSON
    Tools,

    /// Check the adapter and credentials
    Doctor,

    /// Display current configuration
    Config,
}

/// Verbosity level enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    VeryVerbose,
}

impl Args {
    /// Get verbosity level based on flags
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::VeryVerbose,
            }
        }
    }

    /// Subcommand to run; no subcommand means `serve`
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Serve)
    }
}

impl Verbosity {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "quiet",
            Verbosity::Normal => "normal",
            Verbosity::Verbose => "verbose",
            Verbosity::VeryVerbose => "very_verbose",
        }
    }

    /// Log level directive for this verbosity, `configured` for Normal
    pub fn log_level<'a>(&self, configured: &'a str) -> &'a str {
        match self {
            Verbosity::Quiet => "error",
            Verbosity::Normal => configured,
            Verbosity::Verbose => "debug",
            Verbosity::VeryVerbose => "trace",
        }
    }
}
