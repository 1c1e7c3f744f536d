//! Backend entry-point: loads settings, wires stores and serves HTTP.

mod server;

use actix_web::web;
use color_eyre::eyre::{Context, Result};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use complaint_backend::inbound::http::health::HealthState;
use complaint_backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use server::{ServerConfig, ServerSettings, create_server};

fn init_tracing() {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }
}

async fn connect(settings: &ServerSettings, database_url: &str) -> Result<DbPool> {
    if settings.run_migrations {
        run_pending_migrations(database_url)
            .await
            .wrap_err("failed to apply database migrations")?;
    }
    let config = PoolConfig::new(database_url).with_max_size(settings.pool_max_size());
    DbPool::new(config)
        .await
        .wrap_err("failed to build database pool")
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();

    let settings = ServerSettings::load_from_iter(std::env::args_os())
        .wrap_err("failed to load server settings")?;
    let bind_addr = settings.bind_addr()?;
    let mut config = ServerConfig::new(bind_addr);
    if let Some(url) = settings.database_url() {
        config = config.with_db_pool(connect(&settings, url).await?);
    }

    #[cfg(feature = "metrics")]
    {
        config = config.with_metrics(server::build_prometheus());
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config).wrap_err("failed to start server")?;
    info!(%bind_addr, "listening");
    server.await.wrap_err("server terminated with an error")
}
