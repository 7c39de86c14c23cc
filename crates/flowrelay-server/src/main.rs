//! Binary entrypoint for the flowrelay HTTP server.
//!
//! Loads `.env` if present, then reads configuration from environment
//! variables (see [`flowrelay_core::config`]). Refuses to start when the flow
//! id or secret key is missing.

use std::process;

use flowrelay_core::{FlowConfig, ServerConfig};
use flowrelay_server::router::build_router;
use flowrelay_server::state::AppState;
use flowrelay_server::telemetry;

#[tokio::main]
async fn main() {
    let dotenv = dotenvy::dotenv();
    telemetry::init_tracing(telemetry::DEFAULT_LOG_FILTER);
    match dotenv {
        Ok(path) => tracing::info!(path = %path.display(), "loaded environment file"),
        Err(_) => tracing::debug!("no .env file loaded"),
    }

    let flow_config = FlowConfig::from_env().unwrap_or_else(|err| {
        tracing::error!(error = %err, "failed to initialize flow engine configuration");
        process::exit(1);
    });
    let server_config = ServerConfig::from_env().unwrap_or_else(|err| {
        tracing::error!(error = %err, "invalid server configuration");
        process::exit(1);
    });

    let state = AppState::new(flow_config).unwrap_or_else(|err| {
        tracing::error!(error = %err, "failed to initialize application state");
        process::exit(1);
    });
    tracing::info!(endpoint = %state.chat.client().run_url(), "relaying to flow engine");

    let app = build_router(state);

    let addr = server_config.addr();
    tracing::info!("flowrelay server starting on {}", addr);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!(error = %err, addr = %addr, "failed to bind listener");
            process::exit(1);
        }
    };
    if let Err(err) = axum::serve(listener, app).await {
        tracing::error!(error = %err, "server terminated");
        process::exit(1);
    }
}
