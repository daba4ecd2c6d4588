//! HTTP server command
//!
//! Runs one service (discount or order) until Ctrl+C/SIGTERM.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use multishop_core::ShopConfig;
use multishop_server::Service;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Service to run
    #[arg(value_enum)]
    pub service: ServiceKind,

    /// Address to bind to (overrides config/environment)
    #[arg(long, short = 'b')]
    pub bind: Option<SocketAddr>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Database URL (overrides config/environment)
    #[arg(long)]
    pub database_url: Option<String>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceKind {
    /// Coupon CRUD on /api/discounts
    Discount,
    /// Orderings, order lines and addresses
    Order,
}

impl From<ServiceKind> for Service {
    fn from(kind: ServiceKind) -> Self {
        match kind {
            ServiceKind::Discount => Service::Discount,
            ServiceKind::Order => Service::Order,
        }
    }
}

impl ServeArgs {
    /// Flags win over file and environment settings.
    fn apply(&self, config: &mut ShopConfig) {
        if let Some(bind) = self.bind {
            config.server.bind = bind;
        }
        if self.cors_permissive {
            config.server.cors_permissive = true;
        }
        if let Some(url) = &self.database_url {
            config.database.url = url.clone();
        }
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs, mut config: ShopConfig) -> Result<()> {
    args.apply(&mut config);
    let service = Service::from(args.service);

    tracing::info!(
        %service,
        bind = %config.server.bind,
        database = %config.redacted_database_url(),
        "Starting multishop service"
    );

    // Run server (blocks until shutdown)
    multishop_server::run_service(service, &config)
        .await
        .with_context(|| format!("{} service failed", service))?;

    Ok(())
}
