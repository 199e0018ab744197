//! Adapter subprocess invocation
//!
//! Every tool is served by the same external binary:
//! `<adapter> <tool_name> <json_args>`. The child inherits this process's
//! environment (the adapter reads `CAL_API_KEY` from it), gets no stdin,
//! and has its stdout and stderr captured as text.

use crate::errors::{Result, ServerError};
use crate::tools::types::ToolOutcome;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};
use std::time::Instant;
use tokio::process::Command;
use tracing::{debug, warn};

/// File name of the adapter binary, without platform suffix
pub const ADAPTER_FILE_NAME: &str = "adapter";

/// `<directory of the running executable>/adapter`
pub fn default_adapter_path() -> Result<PathBuf> {
    let exe = std::env::current_exe()?;
    let dir = exe.parent().ok_or_else(|| {
        ServerError::ConfigError(format!(
            "executable {} has no parent directory",
            exe.display()
        ))
    })?;

    Ok(dir.join(format!(
        "{}{}",
        ADAPTER_FILE_NAME,
        std::env::consts::EXE_SUFFIX
    )))
}

/// Handle on the external adapter binary
#[derive(Debug, Clone)]
pub struct Adapter {
    path: PathBuf,
}

impl Adapter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Spawn the adapter once and wait for it to exit
    ///
    /// No timeout: the call blocks until the child exits. If the returned
    /// future is dropped first, the child is killed.
    pub async fn invoke(&self, tool: &str, args_json: &str) -> Result<Output> {
        Command::new(&self.path)
            .arg(tool)
            .arg(args_json)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| ServerError::AdapterSpawn {
                path: self.path.clone(),
                source,
            })
    }

    /// Run `tool` through the adapter and fold every failure into an outcome
    ///
    /// Emits one event per call with the tool, adapter path, exit code and
    /// elapsed time.
    pub async fn call_tool<A: Serialize>(&self, tool: &str, args: &A) -> ToolOutcome {
        let start = Instant::now();

        let (outcome, exit_code) = match self.try_call_tool(tool, args).await {
            Ok(completed) => completed,
            Err(e) => (ToolOutcome::Unexpected(e.to_string()), None),
        };

        let elapsed_ms = start.elapsed().as_millis() as u64;
        let adapter = self.path.display();

        match &outcome {
            ToolOutcome::Output(text) => {
                debug!(tool, %adapter, ?exit_code, elapsed_ms, bytes = text.len(), "adapter call succeeded")
            }
            ToolOutcome::AdapterFailed { stderr } => {
                warn!(tool, %adapter, ?exit_code, elapsed_ms, stderr = %stderr.trim_end(), "adapter exited with failure")
            }
            ToolOutcome::Unexpected(error) => {
                warn!(tool, %adapter, ?exit_code, elapsed_ms, %error, "adapter call failed")
            }
        }

        outcome
    }

    /// Spawn the adapter and fold its output
    ///
    /// Errors mean the child never ran. The exit code is `None` when it was
    /// killed by a signal.
    async fn try_call_tool<A: Serialize>(
        &self,
        tool: &str,
        args: &A,
    ) -> Result<(ToolOutcome, Option<i32>)> {
        let args_json = serde_json::to_string(args)?;
        debug!(tool, adapter = %self.path.display(), args = %args_json, "invoking adapter");

        let output = self.invoke(tool, &args_json).await?;
        let exit_code = output.status.code();

        let outcome = fold_output(output).unwrap_or_else(|e| ToolOutcome::Unexpected(e.to_string()));
        Ok((outcome, exit_code))
    }
}

/// Non-zero exit reports stderr verbatim; exit 0 reports trimmed stdout
fn fold_output(output: Output) -> Result<ToolOutcome> {
    if !output.status.success() {
        let stderr = decode_stream("stderr", output.stderr)?;
        return Ok(ToolOutcome::AdapterFailed { stderr });
    }

    let stdout = decode_stream("stdout", output.stdout)?;
    Ok(ToolOutcome::Output(stdout.trim().to_string()))
}

fn decode_stream(stream: &'static str, bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes).map_err(|source| ServerError::AdapterOutputEncoding { stream, source })
}
