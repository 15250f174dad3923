use anyhow::Result;
use crop_yield_service::{
    api::{create_router, AppState},
    Artifacts, Config, PredictionService,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "crop_yield_service=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    let addr = config.socket_addr()?;

    tracing::info!(
        listen_addr = %config.listen_addr,
        artifact_dir = %config.artifact_dir.display(),
        "Starting crop-yield-service"
    );

    // No artifacts, no service.
    let artifacts = match Artifacts::load(&config) {
        Ok(artifacts) => Arc::new(artifacts),
        Err(e) => {
            tracing::error!(error = %e, "Failed to load prediction artifacts");
            return Err(e.into());
        }
    };

    let state = Arc::new(AppState::new(PredictionService::new(artifacts)));
    let app = create_router(state);

    tracing::info!(?addr, "Crop yield service listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
