//! calcom-mcp - Main CLI Entry Point

use anyhow::{Context, Result};
use calcom_mcp::{
    cli::{Args, Commands, Config},
    doctor::Doctor,
    telemetry,
    tools::{Adapter, ToolExecutor, ToolRegistry},
    CalcomServer, ServerIdentity,
};
use clap::Parser;
use rmcp::{transport::stdio, ServiceExt};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::load(args.config.as_deref())?;

    telemetry::init(args.verbosity().log_level(&config.logging.level));

    match args.command() {
        Commands::Serve => serve(&args, &config).await?,
        Commands::Call { tool, args: tool_args } => {
            call_tool(&args, &config, &tool, tool_args.as_deref()).await?
        }
        Commands::Tools => list_tools()?,
        Commands::Doctor => run_doctor(&args, &config)?,
        Commands::Config => show_config(&args, &config)?,
    }

    Ok(())
}

fn resolve_adapter(args: &Args, config: &Config) -> Result<Adapter> {
    let path = config.adapter_path(args.adapter.as_deref())?;
    Ok(Adapter::new(path))
}

async fn serve(args: &Args, config: &Config) -> Result<()> {
    let adapter = resolve_adapter(args, config)?;

    if !adapter.path().is_file() {
        warn!(adapter = %adapter.path().display(), "adapter binary not found; tool calls will fail");
    }
    if std::env::var_os(&config.adapter.credential_env).is_none() {
        warn!(env = %config.adapter.credential_env, "credential not set; the adapter will reject calls");
    }

    info!(
        name = %config.server.name,
        adapter = %adapter.path().display(),
        "starting MCP server on stdio"
    );

    let service = CalcomServer::new(adapter, ServerIdentity::from(config))
        .serve(stdio())
        .await
        .context("failed to start MCP server")?;

    service.waiting().await?;
    info!("MCP server stopped");

    Ok(())
}

async fn call_tool(args: &Args, config: &Config, tool: &str, tool_args: Option<&str>) -> Result<()> {
    let tool_args: serde_json::Value = match tool_args {
        Some(text) => serde_json::from_str(text).context("Invalid JSON args")?,
        None => serde_json::Value::Null,
    };

    let executor = ToolExecutor::new(resolve_adapter(args, config)?);
    let outcome = executor.execute(tool, &tool_args).await?;

    let success = outcome.is_success();
    println!("{}", outcome.into_text());

    if !success {
        std::process::exit(1);
    }

    Ok(())
}

fn list_tools() -> Result<()> {
    let registry = ToolRegistry::new();
    println!("{}", serde_json::to_string_pretty(&registry.schemas())?);
    Ok(())
}

fn run_doctor(args: &Args, config: &Config) -> Result<()> {
    let adapter = resolve_adapter(args, config)?;
    let doctor = Doctor::new(adapter.path().to_path_buf(), config.adapter.credential_env.clone());

    let checks = doctor.run_diagnostics();
    doctor.display_results(&checks);

    std::process::exit(if Doctor::overall_status(&checks) { 0 } else { 1 });
}

fn show_config(args: &Args, config: &Config) -> Result<()> {
    let adapter = resolve_adapter(args, config)?;
    let config_file = args.config.clone().or_else(Config::default_path);

    println!("\ncalcom-mcp configuration\n");

    println!("Server:");
    println!("  Name:         {}", config.server.name);
    println!(
        "  Instructions: {}",
        config.server.instructions.as_deref().unwrap_or("(none)")
    );
    println!();

    println!("Adapter:");
    println!("  Path:         {}", adapter.path().display());
    println!(
        "  Credential:   {} ({})",
        config.adapter.credential_env,
        if std::env::var_os(&config.adapter.credential_env).is_some() { "set" } else { "unset" }
    );
    println!();

    println!("Logging:");
    println!("  Level:        {}", config.logging.level);
    println!("  Verbosity:    {}", args.verbosity().as_str());
    println!();

    if let Some(path) = config_file {
        println!(
            "Config file:    {}{}",
            path.display(),
            if path.exists() { "" } else { " (not found, using defaults)" }
        );
        println!();
    }

    Ok(())
}
