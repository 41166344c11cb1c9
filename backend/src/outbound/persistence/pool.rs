//! PostgreSQL connection pool shared by the Diesel repositories.
//!
//! The pool opens connections on demand. A checkout that cannot be served
//! before [`PoolConfig::checkout_timeout`] elapses yields
//! [`PoolError::Unavailable`], which every repository reports as a connection
//! failure so clients see `503` instead of a hung request.

use std::time::Duration;

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};
use tracing::debug;

const DEFAULT_MAX_SIZE: u32 = 10;
const DEFAULT_CHECKOUT_TIMEOUT: Duration = Duration::from_secs(5);

/// Pool failures. Both carry the driver's message for logs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    #[error("database pool could not be created: {0}")]
    Setup(String),
    #[error("no database connection available: {0}")]
    Unavailable(String),
}

impl PoolError {
    /// Driver message without the variant prefix.
    pub fn into_message(self) -> String {
        match self {
            Self::Setup(message) | Self::Unavailable(message) => message,
        }
    }
}

/// Connection settings for [`DbPool::connect`].
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use recipe_api::outbound::persistence::PoolConfig;
///
/// let config = PoolConfig::new("postgres://localhost/recipes")
///     .with_max_size(4)
///     .with_checkout_timeout(Duration::from_secs(2));
/// assert_eq!(config.max_size(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolConfig {
    database_url: String,
    max_size: u32,
    checkout_timeout: Duration,
}

impl PoolConfig {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_size: DEFAULT_MAX_SIZE,
            checkout_timeout: DEFAULT_CHECKOUT_TIMEOUT,
        }
    }

    /// Cap on open connections. Zero is raised to one.
    pub fn with_max_size(self, max_size: u32) -> Self {
        Self {
            max_size: max_size.max(1),
            ..self
        }
    }

    pub fn with_checkout_timeout(self, checkout_timeout: Duration) -> Self {
        Self {
            checkout_timeout,
            ..self
        }
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn max_size(&self) -> u32 {
        self.max_size
    }

    pub fn checkout_timeout(&self) -> Duration {
        self.checkout_timeout
    }
}

/// Cloneable handle to the bb8 pool of `diesel-async` connections.
#[derive(Clone)]
pub struct DbPool {
    inner: Pool<AsyncPgConnection>,
}

/// A checked-out connection, returned to the pool on drop.
pub type DbConnection<'a> = PooledConnection<'a, AsyncPgConnection>;

impl DbPool {
    /// Create the pool without opening any connection yet.
    ///
    /// # Errors
    /// [`PoolError::Setup`] when bb8 rejects the configuration.
    pub async fn connect(config: &PoolConfig) -> Result<Self, PoolError> {
        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(config.database_url());
        let inner = Pool::builder()
            .max_size(config.max_size())
            .connection_timeout(config.checkout_timeout())
            .build(manager)
            .await
            .map_err(|err| PoolError::Setup(err.to_string()))?;
        debug!(max_size = config.max_size(), "database pool created");
        Ok(Self { inner })
    }

    /// Borrow a connection for one repository call.
    ///
    /// # Errors
    /// [`PoolError::Unavailable`] when the database is unreachable or every
    /// connection stays busy past the checkout timeout.
    pub async fn get(&self) -> Result<DbConnection<'_>, PoolError> {
        self.inner
            .get()
            .await
            .map_err(|err| PoolError::Unavailable(err.to_string()))
    }
}
