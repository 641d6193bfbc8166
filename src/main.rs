//! Bot Studio entry point.
//!
//! The server build hosts the Dioxus app next to the catalog API; the web
//! build only launches the client.

use bot_studio::app::App;

#[cfg(feature = "server")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use bot_studio::{api, bus, catalog, config};
    use std::net::SocketAddr;
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bot_studio=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Starting Bot Studio v{} ({})",
        env!("BOT_STUDIO_VERSION"),
        env!("BOT_STUDIO_GIT_SHA")
    );

    let config = config::load_config()?;
    tracing::info!("Configuration loaded, port: {}", config.port);

    let bus = bus::create_bus();
    let data_dir = config::get_data_dir();
    let store = catalog::CatalogStore::new(data_dir, config.catalog.submission_history);
    let state = api::AppState::new(store, bus);

    // API routes first, then the Dioxus app (SSR + client bundle) for everything else
    let app = api::router(state).merge(dioxus::server::router(App));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
#[cfg(feature = "server")]
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down..."),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down..."),
    }
}

#[cfg(not(feature = "server"))]
fn main() {
    dioxus::launch(App);
}
