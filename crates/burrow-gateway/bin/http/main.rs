mod cli;

use crate::cli::{GeneratorArg, StorageBackendArg, CLI};
use anyhow::Context;
use burrow_core::{LinkStore, Shortener};
use burrow_gateway::telemetry::init_tracing;
use burrow_gateway::{App, AppState};
use burrow_generator::{RandomGenerator, SeqGenerator};
use burrow_shortener::{ShortenerService, ShortenerSettings};
use burrow_storage::{InMemoryLinkStore, SqliteLinkStore, SqliteSettings};
use clap::Parser;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CLI::parse();
    init_tracing(config.log_format.into())?;

    info!(
        listen_addr = %config.listen_addr,
        storage_backend = %config.storage,
        generator = %config.generator,
        code_length = config.code_length,
        max_attempts = config.max_attempts,
        "starting burrow http server"
    );

    let shortener = match config.storage {
        StorageBackendArg::Sqlite => {
            let settings = SqliteSettings::builder()
                .max_connections(config.db_max_connections)
                .build();
            let store = SqliteLinkStore::connect_with(&config.database_url, settings)
                .await
                .with_context(|| format!("failed to open database {}", config.database_url))?;
            build_shortener(store, &config)?
        }
        StorageBackendArg::InMemory => build_shortener(InMemoryLinkStore::new(), &config)?,
    };

    let state = match &config.public_base_url {
        Some(base_url) => AppState::with_base_url(shortener, base_url.clone()),
        None => AppState::new(shortener),
    };

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    info!(listen_addr = %listener.local_addr()?, "listening");

    axum::serve(listener, App::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

fn build_shortener<S: LinkStore>(store: S, config: &CLI) -> anyhow::Result<Arc<dyn Shortener>> {
    let settings = ShortenerSettings::builder()
        .max_attempts(config.max_attempts)
        .build();
    let length = usize::from(config.code_length);

    let shortener: Arc<dyn Shortener> = match config.generator {
        GeneratorArg::Random => Arc::new(ShortenerService::with_settings(
            store,
            RandomGenerator::new(length)?,
            settings,
        )),
        GeneratorArg::Seq => Arc::new(ShortenerService::with_settings(
            store,
            SeqGenerator::new(length)?,
            settings,
        )),
    };

    Ok(shortener)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
