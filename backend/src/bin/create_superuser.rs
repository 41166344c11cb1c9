//! Create an active staff superuser in the configured PostgreSQL database.
//!
//! ```text
//! RECIPES_DATABASE_URL=postgres://localhost/recipes \
//! RECIPES_SUPERUSER_PASSWORD=... \
//!     create-superuser --superuser-email admin@example.com
//! ```

use std::process::ExitCode;
use std::sync::Arc;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

use recipe_api::domain::ports::UserRegistration;
use recipe_api::domain::{EmailAddress, Password, Registration, UserAccountService};
use recipe_api::outbound::persistence::{
    DbPool, DieselUserRepository, PoolConfig, run_pending_migrations,
};
use recipe_api::outbound::security::Argon2PasswordHasher;

/// Inputs for the superuser command.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "RECIPES")]
struct SuperuserSettings {
    /// PostgreSQL URL of the target database.
    database_url: Option<String>,
    /// Login email for the new account.
    superuser_email: Option<String>,
    /// Password for the new account; prefer the environment over the CLI.
    superuser_password: Option<String>,
}

async fn run(settings: SuperuserSettings) -> Result<(), String> {
    let database_url = settings
        .database_url
        .ok_or("RECIPES_DATABASE_URL is required")?;
    let email = settings
        .superuser_email
        .ok_or("RECIPES_SUPERUSER_EMAIL is required")
        .and_then(|raw| EmailAddress::new(raw).map_err(|_| "invalid superuser email"))
        .map_err(str::to_owned)?;
    let password = settings
        .superuser_password
        .ok_or_else(|| "RECIPES_SUPERUSER_PASSWORD is required".to_owned())
        .and_then(|raw| Password::new(&raw).map_err(|error| error.to_string()))?;

    run_pending_migrations(&database_url)
        .await
        .map_err(|error| error.to_string())?;
    let pool = DbPool::connect(&PoolConfig::new(database_url).with_max_size(1))
        .await
        .map_err(|error| error.to_string())?;
    let accounts = UserAccountService::new(
        Arc::new(DieselUserRepository::new(pool)),
        Arc::new(Argon2PasswordHasher::new()),
    );

    let user = accounts
        .register_superuser(Registration::new(email, password))
        .await
        .map_err(|error| error.message().to_owned())?;
    info!(user_id = %user.id(), email = %user.email(), "superuser created");
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .try_init();

    let settings = match SuperuserSettings::load() {
        Ok(settings) => settings,
        Err(error) => {
            error!(%error, "failed to load settings");
            return ExitCode::FAILURE;
        }
    };

    match run(settings).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            error!(%message, "superuser not created");
            ExitCode::FAILURE
        }
    }
}
