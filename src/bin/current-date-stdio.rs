use std::{process::ExitCode, sync::Arc};

use current_date_mcp::{
    clock::SystemClock, logging, stdio::serve_stdio, AppState, STDIO_SERVER_NAME,
};
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    logging::init_logging();

    let state = AppState::new(STDIO_SERVER_NAME, Arc::new(SystemClock));
    match serve_stdio(state).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "stdio transport failed");
            eprintln!("MCP server failed: {err}");
            ExitCode::FAILURE
        }
    }
}
