use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use admin_console::admin_api::AdminHttpClient;
use admin_console::api::router;
use admin_console::config::ConsoleConfig;
use admin_console::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "admin_console=debug".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ConsoleConfig::new_from_env()?;
    let api = AdminHttpClient::from_config(&config)?;
    info!("using admin API at {}", config.api_base_url);

    let state = AppState {
        api: Arc::new(api),
        fetch_timeout: config.fetch_timeout,
    };

    let app = router(state);

    info!("listening on http://{}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
