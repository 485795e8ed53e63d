mod config;

use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use mindful_api::auth::{AppState, AppStateInner};
use mindful_store::Store;

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mindful_server=debug,mindful_api=debug,mindful_store=debug,tower_http=debug".into()),
        )
        .init();

    let config = Config::from_env()?;

    // Shared state. The store lives for the life of the process.
    let app_state: AppState = Arc::new(AppStateInner {
        store: Store::new(),
        jwt_secret: config.jwt_secret.clone(),
        token_ttl: chrono::Duration::days(config.token_ttl_days),
    });

    let app = mindful_api::router(app_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr = config.addr()?;
    info!("Mindful server listening on {}", addr);
    info!("Session tokens valid for {} days", config.token_ttl_days);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
