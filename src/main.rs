use std::{process::ExitCode, sync::Arc};

use current_date_mcp::{
    bind_listener, build_app, clock::SystemClock, config::Config, errors::ServerError, logging,
    AppState, HTTP_SERVER_NAME,
};
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    logging::init_logging();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "server failed");
            eprintln!("Server error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), ServerError> {
    let config = Config::from_env()?;
    let bind_socket = config.bind_socket()?;

    let state = AppState::new(HTTP_SERVER_NAME, Arc::new(SystemClock));
    let app = build_app(state);
    let listener = bind_listener(bind_socket).await?;

    info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        "server starting"
    );
    println!("MCP server running at {}", config.endpoint_url());

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
