//! Address book entry-point: loads settings, prepares persistence, and
//! serves the contacts REST API.

mod server;

use actix_web::web;
use color_eyre::eyre::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use address_book::inbound::http::health::HealthState;
use address_book::outbound::persistence::{DbPool, run_pending_migrations};
use address_book::settings::AddressBookSettings;
use ortho_config::OrthoConfig;

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

    let settings = AddressBookSettings::load().wrap_err("failed to load settings")?;
    let mut config = ServerConfig::from_settings(&settings)?;

    if let Some(pool_config) = settings.pool_config() {
        if settings.run_migrations {
            let applied = run_pending_migrations(pool_config.database_url().to_owned())
                .await
                .wrap_err("failed to apply database migrations")?;
            info!(applied, "database migrations applied");
        }
        let pool = DbPool::new(pool_config)
            .await
            .wrap_err("failed to build database pool")?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    info!(bind_addr = %config.bind_addr(), "starting address book server");
    let server = create_server(health_state.clone(), config)?;
    let handle = server.handle();

    tokio::select! {
        result = server => result?,
        _ = tokio::signal::ctrl_c() => {
            health_state.mark_unhealthy();
            info!("shutdown requested");
            handle.stop(true).await;
        }
    }
    Ok(())
}
