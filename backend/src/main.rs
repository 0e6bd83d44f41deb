//! Backend entry-point: loads settings, prepares the store, and serves the
//! REST API with health probes and OpenAPI docs.

mod server;

use std::sync::Arc;

use actix_web::web;
use color_eyre::eyre::{Context, Result, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use rental_backend::inbound::http::health::HealthState;
use rental_backend::outbound::persistence::{DbPool, DieselStoreProbe, run_pending_migrations};
use rental_backend::settings::AppSettings;

use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|err| eyre!("load settings: {err}"))?;
    let bind_addr = settings.bind_addr()?;
    let database_url = settings.database_url()?.to_owned();

    if settings.run_migrations() {
        let applied = run_pending_migrations(&database_url)
            .await
            .context("apply database migrations")?;
        info!(applied, "database schema up to date");
    }

    let pool = DbPool::new(settings.pool_config()?)
        .await
        .context("build database pool")?;

    let probe = Arc::new(DieselStoreProbe::new(pool.clone()));
    let health_state = web::Data::new(HealthState::new().with_store_probe(probe));
    let config = ServerConfig::new(bind_addr, pool);
    info!(%bind_addr, "starting HTTP server");
    let server = create_server(health_state, config).context("start HTTP server")?;
    server.await.context("run HTTP server")
}
