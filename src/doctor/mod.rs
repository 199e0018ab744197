//! Doctor command for adapter diagnostics
//!
//! Checks that the adapter binary can be launched and that the credential
//! it reads from the environment is present.

use colored::Colorize;
use std::path::{Path, PathBuf};

/// Health check result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    Pass,
    Warn(String),
    Fail(String),
}

/// Individual health check
#[derive(Debug)]
pub struct HealthCheck {
    pub name: String,
    pub status: HealthStatus,
}

impl HealthCheck {
    fn new(name: &str, status: HealthStatus) -> Self {
        Self {
            name: name.to_string(),
            status,
        }
    }
}

/// Doctor diagnostics system
pub struct Doctor {
    adapter_path: PathBuf,
    credential_env: String,
}

impl Doctor {
    pub fn new(adapter_path: PathBuf, credential_env: String) -> Self {
        Self {
            adapter_path,
            credential_env,
        }
    }

    /// Run all health checks
    pub fn run_diagnostics(&self) -> Vec<HealthCheck> {
        vec![
            self.check_adapter_present(),
            self.check_adapter_executable(),
            self.check_credential(std::env::var(&self.credential_env).ok()),
        ]
    }

    fn check_adapter_present(&self) -> HealthCheck {
        let status = if self.adapter_path.is_file() {
            HealthStatus::Pass
        } else if self.adapter_path.exists() {
            HealthStatus::Fail(format!("{} is not a file", self.adapter_path.display()))
        } else {
            HealthStatus::Fail(format!("{} not found", self.adapter_path.display()))
        };

        HealthCheck::new("Adapter", status)
    }

    fn check_adapter_executable(&self) -> HealthCheck {
        let status = match is_executable(&self.adapter_path) {
            Ok(true) => HealthStatus::Pass,
            Ok(false) => HealthStatus::Fail(format!(
                "{} is not executable",
                self.adapter_path.display()
            )),
            Err(e) => HealthStatus::Fail(format!("Cannot inspect adapter: {}", e)),
        };

        HealthCheck::new("Adapter Permissions", status)
    }

    fn check_credential(&self, value: Option<String>) -> HealthCheck {
        let status = match value {
            Some(v) if !v.trim().is_empty() => HealthStatus::Pass,
            Some(_) => HealthStatus::Warn(format!("{} is set but empty", self.credential_env)),
            None => HealthStatus::Warn(format!(
                "{} is not set; the adapter will reject calls",
                self.credential_env
            )),
        };

        HealthCheck::new("Credentials", status)
    }

    /// Display diagnostics results
    pub fn display_results(&self, checks: &[HealthCheck]) {
        println!("\ncalcom-mcp diagnostics");
        println!("Adapter: {}\n", self.adapter_path.display());
        println!("{:<20} Status", "Check");
        println!("{}", "=".repeat(50));

        for check in checks {
            let message = match &check.status {
                HealthStatus::Pass => "PASS".green().to_string(),
                HealthStatus::Warn(msg) => format!("WARN: {}", msg).yellow().to_string(),
                HealthStatus::Fail(msg) => format!("FAIL: {}", msg).red().to_string(),
            };

            println!("{:<20} {}", check.name, message);
        }

        println!();
    }

    /// Get overall health status
    pub fn overall_status(checks: &[HealthCheck]) -> bool {
        !checks.iter().any(|c| matches!(c.status, HealthStatus::Fail(_)))
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> std::io::Result<bool> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = std::fs::metadata(path)?;
    Ok(metadata.is_file() && metadata.permissions().mode() & 0o111 != 0)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> std::io::Result<bool> {
    Ok(std::fs::metadata(path)?.is_file())
}
