use std::path::Path;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use multishop_core::ShopConfig;

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective config (file + environment) as TOML
    Show,
    /// Show config file path
    Path,
}

pub fn run_config(args: ConfigArgs, explicit_path: Option<&Path>) -> Result<()> {
    match args.command {
        ConfigCommands::Show => run_show(explicit_path),
        ConfigCommands::Path => run_path(explicit_path),
    }
}

fn run_show(explicit_path: Option<&Path>) -> Result<()> {
    let config = crate::load_config(explicit_path)?;
    println!("{}", render(&config)?);
    Ok(())
}

fn run_path(explicit_path: Option<&Path>) -> Result<()> {
    match explicit_path {
        Some(path) => println!("{}", path.display()),
        None => println!("{}", ShopConfig::config_path().display()),
    }
    Ok(())
}

/// TOML with the database password masked
fn render(config: &ShopConfig) -> Result<String> {
    let mut shown = config.clone();
    shown.database.url = config.redacted_database_url();
    shown.to_toml().context("Failed to serialize config to TOML")
}
