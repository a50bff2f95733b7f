use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use holonet::Server;
use holonet::api::{self, Service};
use holonet::config::{Config, LogFormat};

const DEFAULT_FILTER: &str = "holonet=info,warn";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::parse();

    init_tracing(config.log_format);

    info!(
        upstream = %config.upstream_url,
        page_size = config.upstream_page_size,
        timeout_secs = config.upstream_timeout_secs,
        "starting holonet"
    );

    let service = Service::new(&config).context("failed to build the upstream client")?;
    Server::bind(config.bind)
        .serve(api::app(service))
        .await
        .context("server error")?;

    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_current_span(true))
            .init(),
    }
}
