use std::{net::SocketAddr, sync::Arc};

use axum::{middleware, routing::post, Router};
use tokio::net::TcpListener;

pub mod clock;
pub mod config;
pub mod domain;
pub mod errors;
pub mod http;
pub mod logging;
pub mod mcp;
pub mod stdio;

use clock::Clock;
use errors::ServerError;
use mcp::context::ContextStats;

pub const STDIO_SERVER_NAME: &str = "local-date-server";
pub const HTTP_SERVER_NAME: &str = "date-info-server";

/// Built once at startup and shared by every transport context; only the context tally
/// changes afterwards.
#[derive(Clone)]
pub struct AppState {
    pub server_name: &'static str,
    pub clock: Arc<dyn Clock>,
    pub contexts: Arc<ContextStats>,
}

impl AppState {
    pub fn new(server_name: &'static str, clock: Arc<dyn Clock>) -> Self {
        Self {
            server_name,
            clock,
            contexts: Arc::new(ContextStats::default()),
        }
    }
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/mcp", post(http::handlers::mcp_endpoint))
        .layer(middleware::from_fn(logging::request_logging_middleware))
        .with_state(state)
}

pub async fn bind_listener(addr: SocketAddr) -> Result<TcpListener, ServerError> {
    TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })
}
