//! Recipe API entry-point: loads settings, prepares storage and serves HTTP.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use recipe_api::ServerSettings;
use recipe_api::inbound::http::health::HealthState;
use recipe_api::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use server::{ServerConfig, SessionCookie, Storage, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings =
        ServerSettings::load().map_err(|error| std::io::Error::other(error.to_string()))?;
    let key = settings.session_key().map_err(std::io::Error::other)?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let storage = match settings.database_url() {
        Some(url) => {
            run_pending_migrations(url)
                .await
                .map_err(std::io::Error::other)?;
            let pool_config = PoolConfig::new(url).with_max_size(settings.db_max_connections());
            let pool = DbPool::connect(&pool_config)
                .await
                .map_err(std::io::Error::other)?;
            Storage::Postgres(pool)
        }
        None => {
            warn!("RECIPES_DATABASE_URL unset; data lives in memory only");
            Storage::Memory
        }
    };
    let session = SessionCookie::new(key, settings.cookie_secure());
    let config = ServerConfig::new(bind_addr, session, storage);

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    info!(%bind_addr, "recipe API listening");
    let result = server.await;
    health_state.mark_unhealthy();
    result
}
