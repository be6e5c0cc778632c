//! Renalyx web server entry point.

use anyhow::Context;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use renalyx_common::RenalyxError;
use renalyx_config::Config;
use renalyx_web::router::build_router;
use renalyx_web::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::load().map_err(|e| {
        let err = RenalyxError::from(e);
        error!(kind = ?err.kind(), "{}", err);
        err
    })?;
    let state = AppState::from_config(&config);
    if !state.pipeline.engine().is_ready() {
        info!("Serving in degraded mode: predictions will fail until the model artifact is fixed");
    }

    let app = build_router(state);
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!("Renalyx listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
