mod cli;

use crate::cli::{LogFormat, CLI};
use anyhow::Context;
use clap::Parser;
use snip_core::SystemClock;
use snip_gateway::{App, AppState};
use snip_generator::RandomGenerator;
use snip_redirector::ResolveService;
use snip_shortener::ShortenService;
use snip_storage::{InMemoryStore, Reaper};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CLI::try_parse()?;
    init_tracing(config.log_format);

    let settings = config.settings();
    settings.validate().context("invalid settings")?;

    info!(
        listen_addr = %config.listen_addr,
        base_url = %config.base_url,
        code_length = settings.code_length,
        default_validity_minutes = settings.default_validity_minutes,
        reap_interval_secs = settings.reap_interval_secs,
        max_generation_retries = settings.max_generation_retries,
        "starting snip server"
    );

    let store = Arc::new(InMemoryStore::new());
    let generator = RandomGenerator::from_settings(&settings)?;
    let shortener = ShortenService::new(
        Arc::clone(&store),
        generator,
        SystemClock,
        settings.clone(),
    )?;
    let resolver = ResolveService::new(Arc::clone(&store), SystemClock);
    let reaper = Reaper::new(Arc::clone(&store), SystemClock).spawn(settings.reap_interval());

    let state = AppState::new(Arc::new(shortener), Arc::new(resolver), config.base_url);
    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    info!(listen_addr = %listener.local_addr()?, "listening");

    axum::serve(listener, App::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    reaper.shutdown().await?;
    info!("snip server stopped");

    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match format {
        LogFormat::Pretty => builder.pretty().init(),
        LogFormat::Json => builder.json().init(),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
    }
    info!("shutdown signal received");
}
