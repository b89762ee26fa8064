//! sidesheetd entry point.

use std::process::ExitCode;
use std::sync::Arc;

use tracing::info;

use sidesheet_core::{TracingConfig, init_tracing};
use sidesheet_server::{AppState, ServerConfig, ServerResult, build_router};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> ServerResult<()> {
    init_tracing(TracingConfig::service())?;

    let config = ServerConfig::from_env()?;

    let pool = sidesheet_store::connect(&config.db_path).await?;
    sidesheet_store::init_schema(&pool).await?;

    let state = Arc::new(AppState::new(pool));
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!(addr = %config.addr, db = %config.db_path, "sidesheetd listening");
    axum::serve(listener, router).await?;

    Ok(())
}
