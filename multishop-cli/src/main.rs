//! multishop CLI - runs the discount and order microservices
//!
//! - `multishop serve discount|order`: HTTP service over PostgreSQL
//! - `multishop config show|path`: inspect the effective configuration

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use multishop_core::ShopConfig;

mod commands;
mod config;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "multishop",
    author,
    version,
    about = "MultiShop discount and order services",
    long_about = "Run the coupon (discount) and order microservices over PostgreSQL, \
                  or inspect the configuration they start from."
)]
struct Cli {
    /// Enable debug logging (RUST_LOG still wins when set)
    #[arg(long, global = true)]
    debug: bool,

    /// Export traces over OTLP (requires the `telemetry` feature)
    #[arg(long, global = true)]
    otel: bool,

    /// Config file (default: ~/.multishop/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run one service's HTTP API
    Serve(commands::serve::ServeArgs),
    /// Inspect configuration (show, path)
    Config(config::ConfigArgs),
}

/// Only commands that read settings call this; `config path` must work
/// even when the file is broken.
pub(crate) fn load_config(path: Option<&Path>) -> Result<ShopConfig> {
    match path {
        Some(path) => ShopConfig::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => ShopConfig::load().context("Failed to load config"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_setup::init(&tracing_setup::TracingConfig {
        debug: cli.debug,
        otel: cli.otel,
    })
    .ok();

    let result = match cli.command {
        Commands::Serve(args) => match load_config(cli.config.as_deref()) {
            Ok(config) => commands::run_serve(args, config).await,
            Err(e) => Err(e),
        },
        Commands::Config(args) => config::run_config(args, cli.config.as_deref()),
    };

    tracing_setup::shutdown_otel();
    result
}
