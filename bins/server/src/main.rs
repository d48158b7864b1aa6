//! Emma Media Relay Server
//!
//! Main entry point: receives provider webhooks, stores media and
//! rebroadcasts it to the channel.

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use emma_api::{AppState, LineRelay, create_router};
use emma_core::broadcast::BroadcastDispatcher;
use emma_core::materializer::MediaMaterializer;
use emma_core::preview::PreviewSource;
use emma_core::relay::MediaRelay;
use emma_core::storage::ObjectPublisher;
use emma_line::LineClient;
use emma_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    init_tracing();

    // Load configuration
    let config = AppConfig::load().context("failed to load configuration")?;

    let relay = build_relay(&config)?;
    let state = AppState::new(relay, config.webhook.clone());

    // Create router
    let app = create_router(state, config.server.body_limit_bytes);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "emma=debug,tower_http=debug".into());

    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

fn build_relay(config: &AppConfig) -> anyhow::Result<LineRelay> {
    let line = LineClient::new(&config.line).context("failed to build LINE client")?;

    let publisher =
        ObjectPublisher::from_config(&config.storage).context("failed to initialize storage")?;
    info!(
        provider = publisher.provider_name(),
        bucket = publisher.bucket(),
        public_base_url = %config.storage.public_base_url,
        "Storage configured"
    );

    let preview = PreviewSource::from_config(&config.preview);
    info!(strategy = preview.name(), "Video preview configured");

    Ok(MediaRelay::new(
        MediaMaterializer::new(line.clone(), preview, publisher),
        BroadcastDispatcher::new(line),
    ))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
