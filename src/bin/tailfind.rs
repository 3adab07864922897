//! tailfind — Tailfin daemon.
//!
//! Serves the enrichment gateway over HTTP, fronting the AirLabs API
//! with a shared response cache and an outbound call budget.

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::{info, warn};

use tailfin::server::config::{Config, Secrets};
use tailfin::server::{AppState, router};
use tailfin::{CacheConfig, EnrichmentGateway, RateConfig, Tailfin};

/// Tailfin daemon — flight enrichment proxy.
#[derive(Parser)]
#[command(name = "tailfind")]
#[command(version)]
#[command(about = "Flight enrichment proxy daemon")]
struct Args {
    /// Path to configuration file.
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let config = Config::load(args.config.as_deref())?;
    let secrets = Secrets::load()?;

    let gateway = build_gateway(&config, &secrets)?;
    if !gateway.has_provider() {
        warn!("no AirLabs API key configured, serving empty enrichments");
    }

    let state = AppState {
        gateway: Arc::new(gateway),
        expose_error_details: config.server.expose_error_details,
    };

    let listener = tokio::net::TcpListener::bind(&config.server.address).await?;
    info!(address = %config.server.address, "tailfind starting");

    axum::serve(listener, router(state)).await?;

    Ok(())
}

/// Build an [`EnrichmentGateway`] from configuration.
fn build_gateway(config: &Config, secrets: &Secrets) -> tailfin::Result<EnrichmentGateway> {
    let mut builder = Tailfin::builder()
        .cache(
            CacheConfig::new()
                .max_entries(config.cache.max_entries)
                .ttl(Duration::from_secs(config.cache.ttl_secs)),
        )
        .rate(
            RateConfig::new()
                .per_minute(config.rate.per_minute)
                .burst(config.rate.burst),
        )
        .upstream_timeout(Duration::from_secs(config.airlabs.timeout_secs));

    if let Some(key) = secrets.airlabs_key() {
        builder = builder.airlabs(key);
    }

    if let Some(ref url) = config.airlabs.base_url {
        builder = builder.base_url(url);
    }

    builder.build()
}
