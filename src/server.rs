//! MCP server exposing the adapter-backed tools
//!
//! Tool handlers always answer with a successful tool result carrying one
//! text block; adapter failures travel inside that text.

use crate::cli::Config;
use crate::tools::adapter::Adapter;
use crate::tools::bookings::{self, LIST_BOOKINGS};
use crate::tools::types::ListBookingsArgs;
use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use std::sync::Arc;
use tracing::info;

/// Server identity reported during MCP initialization
#[derive(Debug, Clone)]
pub struct ServerIdentity {
    pub name: String,
    pub instructions: Option<String>,
}

impl From<&Config> for ServerIdentity {
    fn from(config: &Config) -> Self {
        Self {
            name: config.server.name.clone(),
            instructions: config.server.instructions.clone(),
        }
    }
}

#[derive(Clone)]
pub struct CalcomServer {
    adapter: Arc<Adapter>,
    identity: Arc<ServerIdentity>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl CalcomServer {
    pub fn new(adapter: Adapter, identity: ServerIdentity) -> Self {
        Self {
            adapter: Arc::new(adapter),
            identity: Arc::new(identity),
            tool_router: Self::tool_router(),
        }
    }

    pub fn adapter(&self) -> &Adapter {
        &self.adapter
    }

    /// Names of the tools advertised to clients
    pub fn tool_names(&self) -> Vec<String> {
        self.tool_router
            .list_all()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect()
    }

    #[tool(name = "list_bookings", description = "List bookings from Cal.com")]
    async fn list_bookings(
        &self,
        Parameters(args): Parameters<ListBookingsArgs>,
    ) -> Result<CallToolResult, McpError> {
        info!(tool = LIST_BOOKINGS, limit = args.limit, status = ?args.status, "tool call");

        let text = bookings::list_bookings(&self.adapter, &args).await.into_text();
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}

#[tool_handler]
impl ServerHandler for CalcomServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: self.identity.name.clone(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: self.identity.instructions.clone(),
            ..Default::default()
        }
    }
}
