//! MCP transports
//!
//! Streamable HTTP (nested into an Axum router) and stdio. Both serve the
//! same [`Dispatcher`].

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{Json, Router, routing::get};
use rmcp::{
    ServiceExt,
    transport::{
        stdio,
        streamable_http_server::{
            StreamableHttpServerConfig, StreamableHttpService, session::local::LocalSessionManager,
        },
    },
};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing::info;

use super::dispatcher::Dispatcher;
use super::error::TransportError;
use super::server::McpServer;

/// Create MCP Streamable HTTP service
///
/// Every session gets its own [`McpServer`]; all of them share `dispatcher`.
///
/// # Example
/// ```no_run
/// use std::sync::Arc;
/// use axum::Router;
/// use tokio_util::sync::CancellationToken;
/// # use clickup_mcp::clickup::HttpClickUp;
/// # use clickup_mcp::mcp::{Dispatcher, ToolContext, ToolFilter, create_mcp_service, default_registry};
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// # let api = HttpClickUp::new("pk_123", "9000", None)?;
/// let context = ToolContext::new(Arc::new(api));
/// let dispatcher = Arc::new(Dispatcher::new(default_registry(), ToolFilter::allow_all(), context));
///
/// let ct = CancellationToken::new();
/// let app: Router = Router::new().nest_service("/mcp", create_mcp_service(dispatcher, ct));
/// # Ok(())
/// # }
/// ```
pub fn create_mcp_service(
    dispatcher: Arc<Dispatcher>,
    cancellation_token: CancellationToken,
) -> StreamableHttpService<McpServer, LocalSessionManager> {
    // Returns io::Error to match rmcp's expected signature
    let service_factory = move || -> Result<McpServer, std::io::Error> {
        Ok(McpServer::new(Arc::clone(&dispatcher)))
    };

    let mut config = StreamableHttpServerConfig::default()
        .with_sse_keep_alive(None)
        .with_sse_retry(None)
        .with_stateful_mode(true);
    config.cancellation_token = cancellation_token;

    StreamableHttpService::new(
        service_factory,
        LocalSessionManager::default().into(),
        config,
    )
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Router with the MCP endpoint at `/mcp` and a `/health` probe.
pub fn create_router(dispatcher: Arc<Dispatcher>, cancellation_token: CancellationToken) -> Router {
    Router::new()
        .nest_service("/mcp", create_mcp_service(dispatcher, cancellation_token))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
}

/// Serve over HTTP until Ctrl-C.
pub async fn serve_http(dispatcher: Arc<Dispatcher>, addr: SocketAddr) -> Result<(), TransportError> {
    let ct = CancellationToken::new();
    let app = create_router(dispatcher, ct.clone());

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| TransportError::Bind {
            addr: addr.to_string(),
            source,
        })?;
    info!("MCP server listening on http://{}/mcp", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
            ct.cancel();
        })
        .await?;
    Ok(())
}

/// Serve a single session over stdin/stdout until the client disconnects.
pub async fn serve_stdio(dispatcher: Arc<Dispatcher>) -> Result<(), TransportError> {
    info!("MCP server running on stdio");
    let service = McpServer::new(dispatcher)
        .serve(stdio())
        .await
        .map_err(|e| TransportError::Initialize {
            message: e.to_string(),
        })?;
    service.waiting().await.map_err(|e| TransportError::Session {
        message: e.to_string(),
    })?;
    Ok(())
}
