use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use lyrics_api::{
    api::{create_router, AppState},
    config::Config,
    services::GeniusProvider,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    // One HTTP client shared by every request
    let provider = GeniusProvider::new(
        config.genius_access_token.clone(),
        config.genius_api_url.clone(),
    )
    .context("Failed to build Genius client")?;
    let state = AppState::new(Arc::new(provider));

    let app = create_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!(address = %addr, genius_api = %config.genius_api_url, "Lyrics API listening");

    axum::serve(listener, app).await?;
    Ok(())
}
