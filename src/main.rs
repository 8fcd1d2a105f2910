use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::EnvFilter;

use cramly::api::{create_router, AppState};
use cramly::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();
    let addr = format!("{}:{}", config.server.host, config.server.port);

    if config.llm.api_key.is_none() {
        tracing::warn!("LLM_API_KEY is not set; AI endpoints will return errors");
    }

    let state = AppState::new(config);
    let app = create_router(state);

    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("cramly listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to install ctrl-c handler");
        return;
    }
    tracing::info!("shutdown signal received");
}
