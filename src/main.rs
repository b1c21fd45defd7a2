//! JAG Atlas HTTP server.

use anyhow::{Context, Result};
use clap::Parser;
use jag_atlas::config::ServerConfig;
use jag_atlas::http::{AppState, router};
use jag_atlas::persistence::{InMemoryDatabase, PgStore, build_pool};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let config = ServerConfig::parse();
    jag_atlas::telemetry::init(&config.log_level)
        .map_err(|err| anyhow::anyhow!(err))
        .context("failed to initialise logging")?;

    let state = match &config.database_url {
        Some(url) => {
            let pool = build_pool(url, config.pool_size).context("failed to build pool")?;
            let store = PgStore::new(pool).with_statement_timeout(config.request_timeout());
            info!(pool_size = config.pool_size, "using PostgreSQL store");
            AppState::postgres(&store)
        }
        None => {
            info!("DATABASE_URL not set, using in-memory store");
            AppState::in_memory(InMemoryDatabase::new())
        }
    };

    if config.create_tables {
        state
            .schema
            .create_tables()
            .await
            .context("failed to create tables")?;
    }

    let app = router(state, &config.http());
    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    info!(address = %config.bind, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
