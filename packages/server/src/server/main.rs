// Main entry point for the counting game server

use std::sync::Arc;

use anyhow::{Context, Result};
use counting_core::domains::counting::CountingGame;
use counting_core::kernel::{
    BaseChatReactor, BaseKeyValueStore, ConnectorOptions, HttpConnector, InMemoryStore,
    JsonFileStore, LogReactor, PostgresStore, ServerDeps,
};
use counting_core::server::{build_app, AppState};
use counting_core::Config;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,counting_core=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting counting game server");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    let store = connect_store(&config).await?;
    tracing::info!(backend = store.backend_name(), "State store ready");

    let reactor: Arc<dyn BaseChatReactor> = match &config.connector_url {
        Some(base_url) => Arc::new(HttpConnector::new(ConnectorOptions {
            base_url: base_url.clone(),
            token: config.connector_token.clone(),
        })),
        None => {
            tracing::warn!("CONNECTOR_URL not set, reactions will only be logged");
            Arc::new(LogReactor)
        }
    };

    let deps = ServerDeps::new(store, reactor);
    let game = Arc::new(CountingGame::start(&deps, config.counting_settings()).await);

    let app = build_app(
        AppState {
            game: game.clone(),
            bot_user_id: config.bot_user_id.clone(),
        },
        config.admin_token.clone(),
    );

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Flushing pending state");
    game.shutdown().await;

    Ok(())
}

/// Pick the store backend: Postgres, then JSON files, then memory.
async fn connect_store(config: &Config) -> Result<Arc<dyn BaseKeyValueStore>> {
    if let Some(database_url) = &config.database_url {
        tracing::info!("Connecting to database...");
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await
            .context("Failed to connect to database")?;

        let store = PostgresStore::new(pool);
        tracing::info!("Running database migrations...");
        store.migrate().await.context("Failed to run migrations")?;
        return Ok(Arc::new(store));
    }

    if let Some(dir) = &config.state_dir {
        let store = JsonFileStore::open(dir.clone())
            .await
            .with_context(|| format!("Failed to open state directory {}", dir.display()))?;
        return Ok(Arc::new(store));
    }

    tracing::warn!("No DATABASE_URL or STATE_DIR set, state will not survive a restart");
    Ok(Arc::new(InMemoryStore::new()))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
