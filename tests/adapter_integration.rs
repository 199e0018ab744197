//! Integration tests for the adapter-backed `list_bookings` tool
//!
//! Uses small shell scripts as stand-in adapters, so these only run on unix.

#![cfg(unix)]

use calcom_mcp::cli::Config;
use calcom_mcp::tools::bookings::list_bookings;
use calcom_mcp::tools::{Adapter, BookingStatus, ListBookingsArgs, ToolExecutor, ToolOutcome};
use calcom_mcp::{CalcomServer, ServerIdentity};
use rmcp::model::{CallToolRequestParam, ErrorCode};
use rmcp::service::ServiceError;
use rmcp::ServiceExt;
use serde_json::{json, Value};
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;
use tokio::sync::{Mutex, MutexGuard};

/// Held from writing a stub until its last exec: a concurrent fork could
/// otherwise inherit the open write handle and the exec fails with ETXTBSY.
static SERIAL: Mutex<()> = Mutex::const_new(());

async fn serial() -> MutexGuard<'static, ()> {
    SERIAL.lock().await
}

/// Write an executable `adapter` script into a fresh temp dir
fn stub_adapter(body: &str) -> (Adapter, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let path: PathBuf = temp_dir.path().join("adapter");

    std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();

    (Adapter::new(path), temp_dir)
}

#[tokio::test]
async fn test_success_output_is_trimmed() {
    let _serial = serial().await;
    let (adapter, _temp) = stub_adapter(r#"printf 'OK\n'"#);

    let text = list_bookings(&adapter, &ListBookingsArgs::default()).await.into_text();
    assert_eq!(text, "OK");
}

#[tokio::test]
async fn test_surrounding_whitespace_is_trimmed() {
    let _serial = serial().await;
    let (adapter, _temp) = stub_adapter(r#"printf '\n  [{"id": 1}]  \n\n'"#);

    let outcome = list_bookings(&adapter, &ListBookingsArgs::default()).await;
    assert_eq!(outcome, ToolOutcome::Output(r#"[{"id": 1}]"#.to_string()));
}

#[tokio::test]
async fn test_nonzero_exit_reports_stderr() {
    let _serial = serial().await;
    let (adapter, _temp) = stub_adapter("printf 'boom' >&2\nexit 1");

    let text = list_bookings(&adapter, &ListBookingsArgs::default()).await.into_text();
    assert_eq!(text, "Error executing tool: boom");
}

#[tokio::test]
async fn test_nonzero_exit_ignores_stdout() {
    let _serial = serial().await;
    let (adapter, _temp) = stub_adapter("echo partial\nprintf 'Unknown tool: x\\n' >&2\nexit 3");

    let text = list_bookings(&adapter, &ListBookingsArgs::default()).await.into_text();
    assert_eq!(text, "Error executing tool: Unknown tool: x\n");
}

#[tokio::test]
async fn test_signal_killed_adapter_reports_stderr() {
    let _serial = serial().await;
    let (adapter, _temp) = stub_adapter("printf 'dying' >&2\nkill -9 $$");

    let outcome = list_bookings(&adapter, &ListBookingsArgs::default()).await;
    assert_eq!(outcome, ToolOutcome::AdapterFailed { stderr: "dying".to_string() });
    assert_eq!(outcome.into_text(), "Error executing tool: dying");
}

#[tokio::test]
async fn test_invalid_utf8_stdout_is_unexpected_error() {
    let _serial = serial().await;
    let (adapter, _temp) = stub_adapter(r"printf '\377\376'");

    let text = list_bookings(&adapter, &ListBookingsArgs::default()).await.into_text();
    assert!(text.starts_with("Unexpected error: "), "got {:?}", text);
    assert!(text.contains("stdout"), "got {:?}", text);
}

#[tokio::test]
async fn test_invalid_utf8_stderr_is_unexpected_error() {
    let _serial = serial().await;
    let (adapter, _temp) = stub_adapter("printf '\\377' >&2\nexit 1");

    let text = list_bookings(&adapter, &ListBookingsArgs::default()).await.into_text();
    assert!(text.starts_with("Unexpected error: "), "got {:?}", text);
    assert!(text.contains("stderr"), "got {:?}", text);
}

/// A zombie still has a /proc entry until it is reaped
#[cfg(target_os = "linux")]
fn process_running(pid: &str) -> bool {
    match std::fs::read_to_string(format!("/proc/{}/stat", pid)) {
        Ok(stat) => {
            let state = stat.rsplit(')').next().unwrap_or("").trim_start();
            !(state.starts_with('Z') || state.starts_with('X'))
        }
        Err(_) => false,
    }
}

#[cfg(target_os = "linux")]
#[tokio::test]
async fn test_cancelled_call_kills_adapter() {
    let _serial = serial().await;
    let pid_dir = TempDir::new().unwrap();
    let pid_file = pid_dir.path().join("adapter.pid");
    let (adapter, _temp) = stub_adapter(&format!(
        "echo $$ > '{}'\nexec sleep 30",
        pid_file.display()
    ));

    let args = ListBookingsArgs::default();
    let call = list_bookings(&adapter, &args);
    let result = tokio::time::timeout(Duration::from_secs(1), call).await;
    assert!(result.is_err(), "adapter should still be sleeping");

    let pid = std::fs::read_to_string(&pid_file).unwrap().trim().to_string();
    let mut running = true;
    for _ in 0..50 {
        running = process_running(&pid);
        if !running {
            break;
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }

    assert!(!running, "adapter pid {} outlived the dropped call", pid);
}

#[tokio::test]
async fn test_missing_adapter_is_unexpected_error() {
    let _serial = serial().await;
    let temp_dir = TempDir::new().unwrap();
    let adapter = Adapter::new(temp_dir.path().join("adapter"));

    let text = list_bookings(&adapter, &ListBookingsArgs::default()).await.into_text();
    assert!(text.starts_with("Unexpected error: "), "got {:?}", text);
}

#[tokio::test]
async fn test_non_executable_adapter_is_unexpected_error() {
    let _serial = serial().await;
    let (adapter, _temp) = stub_adapter("echo never");
    std::fs::set_permissions(adapter.path(), std::fs::Permissions::from_mode(0o644)).unwrap();

    let text = list_bookings(&adapter, &ListBookingsArgs::default()).await.into_text();
    assert!(text.starts_with("Unexpected error: "), "got {:?}", text);
}

#[tokio::test]
async fn test_adapter_receives_tool_name_and_payload() {
    let _serial = serial().await;
    let (adapter, _temp) = stub_adapter(r##"printf '%s|%s|%s' "$#" "$1" "$2""##);

    let args = ListBookingsArgs::new(3, Some(BookingStatus::Recurring));
    let text = list_bookings(&adapter, &args).await.into_text();

    assert_eq!(text, r#"2|list_bookings|{"limit":3,"status":"recurring"}"#);
}

#[tokio::test]
async fn test_payload_defaults_to_limit_only() {
    let _serial = serial().await;
    let (adapter, _temp) = stub_adapter(r#"printf '%s' "$2""#);

    let text = list_bookings(&adapter, &ListBookingsArgs::default()).await.into_text();
    let payload: serde_json::Value = serde_json::from_str(&text).unwrap();

    assert_eq!(payload, json!({"limit": 10}));
}

#[tokio::test]
async fn test_every_status_reaches_adapter() {
    let _serial = serial().await;
    let (adapter, _temp) = stub_adapter(r#"printf '%s' "$2""#);

    for status in BookingStatus::ALL {
        let text = list_bookings(&adapter, &ListBookingsArgs::new(50, Some(status))).await.into_text();
        let payload: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(payload, json!({"limit": 50, "status": status.as_str()}));
    }
}

#[tokio::test]
async fn test_environment_is_inherited() {
    let _serial = serial().await;
    std::env::set_var("CALCOM_MCP_TEST_INHERITED", "cal_test_key");
    let (adapter, _temp) = stub_adapter(r#"printf '%s' "$CALCOM_MCP_TEST_INHERITED""#);

    let text = list_bookings(&adapter, &ListBookingsArgs::default()).await.into_text();
    assert_eq!(text, "cal_test_key");
}

#[tokio::test]
async fn test_adapter_stdin_is_closed() {
    let _serial = serial().await;
    let (adapter, _temp) = stub_adapter("cat\necho done");

    let text = list_bookings(&adapter, &ListBookingsArgs::default()).await.into_text();
    assert_eq!(text, "done");
}

#[tokio::test]
async fn test_executor_routes_call_subcommand_args() {
    let _serial = serial().await;
    let (adapter, _temp) = stub_adapter(r#"printf '%s %s' "$1" "$2""#);
    let executor = ToolExecutor::new(adapter);

    let outcome = executor
        .execute("list_bookings", &json!({"status": "past"}))
        .await
        .unwrap();

    assert!(outcome.is_success());
    assert_eq!(outcome.into_text(), r#"list_bookings {"limit":10,"status":"past"}"#);
}

#[tokio::test]
async fn test_concurrent_calls_are_independent() {
    let _serial = serial().await;
    let (adapter, _temp) = stub_adapter(r#"printf '%s' "$2""#);
    let server = CalcomServer::new(adapter, ServerIdentity::from(&Config::default()));

    let mut handles = vec![];
    for limit in 1..=4 {
        let adapter = server.adapter().clone();
        handles.push(tokio::spawn(async move {
            let args = ListBookingsArgs::new(limit, None);
            (limit, list_bookings(&adapter, &args).await.into_text())
        }));
    }

    for handle in handles {
        let (limit, text) = handle.await.unwrap();
        assert_eq!(text, format!(r#"{{"limit":{}}}"#, limit));
    }
}

fn list_bookings_call(arguments: Value) -> CallToolRequestParam {
    serde_json::from_value(json!({"name": "list_bookings", "arguments": arguments})).unwrap()
}

#[tokio::test]
async fn test_mcp_round_trip() {
    let _serial = serial().await;
    let (adapter, _temp) = stub_adapter(r#"printf '%s %s' "$1" "$2""#);
    let server = CalcomServer::new(adapter, ServerIdentity::from(&Config::default()));

    let (server_io, client_io) = tokio::io::duplex(4096);
    let server_task = tokio::spawn(async move {
        let service = server.serve(server_io).await?;
        service.waiting().await?;
        anyhow::Ok(())
    });

    let client = ().serve(client_io).await.unwrap();

    let tools = client.list_tools(Default::default()).await.unwrap();
    let names: Vec<String> = tools.tools.iter().map(|tool| tool.name.to_string()).collect();
    assert_eq!(names, vec!["list_bookings".to_string()]);

    let result = client
        .call_tool(list_bookings_call(json!({"limit": 5.0, "status": "cancelled"})))
        .await
        .unwrap();
    let value = serde_json::to_value(&result).unwrap();
    assert_ne!(value["isError"], json!(true));
    assert_eq!(
        value["content"][0]["text"],
        json!(r#"list_bookings {"limit":5,"status":"cancelled"}"#)
    );

    let err = client
        .call_tool(list_bookings_call(json!({"limit": 2, "status": "pending"})))
        .await
        .unwrap_err();
    match err {
        ServiceError::McpError(error) => assert_eq!(error.code, ErrorCode::INVALID_PARAMS),
        other => panic!("expected invalid params, got {:?}", other),
    }

    client.cancel().await.unwrap();
    tokio::time::timeout(Duration::from_secs(5), server_task)
        .await
        .unwrap()
        .unwrap()
        .unwrap();
}
