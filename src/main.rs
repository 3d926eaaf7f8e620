use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use unisystem_ui::backend::HttpBackendClient;
use unisystem_ui::config::AppConfig;
use unisystem_ui::routes::router;
use unisystem_ui::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "unisystem_ui=debug,tower_http=info".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::new_from_env()?;
    let client = HttpBackendClient::new(config.backend_url.clone())?;
    let state = AppState::new(Arc::new(client), config.counters);

    let app = router(state);

    info!("forwarding to backend at {}", config.backend_url);
    info!("listening on http://{}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
