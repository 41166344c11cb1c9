//! Runtime choices the server is assembled from.

use std::net::SocketAddr;

use actix_web::cookie::Key;
use recipe_api::outbound::persistence::DbPool;

/// Where the repositories keep their data.
#[derive(Clone)]
pub enum Storage {
    /// Process-local maps; everything is lost on restart.
    Memory,
    Postgres(DbPool),
}

impl Storage {
    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Postgres(_) => "postgres",
        }
    }
}

/// Encryption key and transport policy for the session cookie.
#[derive(Clone)]
pub struct SessionCookie {
    pub(crate) key: Key,
    pub(crate) secure: bool,
}

impl SessionCookie {
    /// `secure` restricts the cookie to HTTPS; disable it only for local runs.
    #[must_use]
    pub fn new(key: Key, secure: bool) -> Self {
        Self { key, secure }
    }
}

/// Everything [`create_server`](super::create_server) needs besides probes.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) session: SessionCookie,
    pub(crate) storage: Storage,
}

impl ServerConfig {
    #[must_use]
    pub fn new(bind_addr: SocketAddr, session: SessionCookie, storage: Storage) -> Self {
        Self {
            bind_addr,
            session,
            storage,
        }
    }
}
