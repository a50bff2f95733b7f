//! Startup configuration.
//!
//! Every flag can also be set through its `HOLONET_*` environment variable.
//! `main` loads a `.env` file first, so local overrides live there.

use std::net::SocketAddr;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use url::Url;

/// Variable-size pagination, search and sorting in front of the Star Wars API.
#[derive(Clone, Debug, Parser)]
#[command(name = "holonet", version, about, long_about = None)]
pub struct Config {
    /// Address to listen on
    #[arg(long, env = "HOLONET_BIND", default_value = "0.0.0.0:8080")]
    pub bind: SocketAddr,

    /// Root of the upstream catalog
    #[arg(long, env = "HOLONET_UPSTREAM_URL", default_value = "https://swapi.dev/api")]
    pub upstream_url: Url,

    /// Records per upstream page
    #[arg(
        long,
        env = "HOLONET_UPSTREAM_PAGE_SIZE",
        default_value_t = crate::swapi::DEFAULT_PAGE_SIZE,
        value_parser = clap::value_parser!(u64).range(1..),
    )]
    pub upstream_page_size: u64,

    /// Timeout for a single upstream call, in seconds
    #[arg(
        long,
        env = "HOLONET_UPSTREAM_TIMEOUT_SECS",
        default_value_t = 10,
        value_parser = clap::value_parser!(u64).range(1..),
    )]
    pub upstream_timeout_secs: u64,

    /// Log output format
    #[arg(long, env = "HOLONET_LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}

impl Config {
    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable, for terminals
    #[default]
    Pretty,
    /// One JSON object per line, for log shippers
    Json,
}
