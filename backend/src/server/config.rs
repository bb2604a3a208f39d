//! Server settings and the assembled server configuration.

use std::ffi::OsString;
use std::net::{AddrParseError, SocketAddr};

use actix_web::cookie::{Key, SameSite};
#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;
use color_eyre::eyre::{Result, eyre};
use ortho_config::OrthoConfig;
use serde::Deserialize;

use contest_backend::domain::DEFAULT_ADMIN_SESSION_TTL_MINUTES;
use contest_backend::outbound::persistence::{DEFAULT_MAX_CONNECTIONS, DbPool};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Environment-driven server settings (`CONTEST_*`).
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CONTEST")]
pub struct ServerSettings {
    /// Listen address, e.g. `0.0.0.0:8080`.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. Without it the server keeps registrations in memory.
    pub database_url: Option<String>,
    pub db_max_connections: Option<u32>,
    pub admin_session_ttl_minutes: Option<i64>,
}

impl ServerSettings {
    /// Load from the environment only; command-line flags are not read.
    pub fn from_env() -> Result<Self> {
        Self::load_from_iter([OsString::from("contest-backend")])
            .map_err(|err| eyre!("load server settings: {err}"))
    }

    pub fn bind_addr(&self) -> std::result::Result<SocketAddr, AddrParseError> {
        self.bind_addr
            .as_deref()
            .unwrap_or(DEFAULT_BIND_ADDR)
            .trim()
            .parse()
    }

    /// Configured database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS)
    }

    /// Admin session lifetime, at least one minute.
    pub fn admin_session_ttl(&self) -> chrono::Duration {
        let minutes = self
            .admin_session_ttl_minutes
            .unwrap_or(DEFAULT_ADMIN_SESSION_TTL_MINUTES)
            .max(1);
        chrono::Duration::minutes(minutes)
    }
}

impl std::fmt::Debug for ServerSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerSettings")
            .field("bind_addr", &self.bind_addr)
            .field("database_url", &self.database_url.as_ref().map(|_| "<redacted>"))
            .field("db_max_connections", &self.db_max_connections)
            .field("admin_session_ttl_minutes", &self.admin_session_ttl_minutes)
            .finish()
    }
}

/// Everything `create_server` needs.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) admin_session_ttl: chrono::Duration,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: Option<PrometheusMetrics>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            db_pool: None,
            admin_session_ttl: chrono::Duration::minutes(DEFAULT_ADMIN_SESSION_TTL_MINUTES),
            #[cfg(feature = "metrics")]
            prometheus: None,
        }
    }

    /// Use PostgreSQL instead of the in-memory account store.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    #[must_use]
    pub fn with_admin_session_ttl(mut self, ttl: chrono::Duration) -> Self {
        self.admin_session_ttl = ttl;
        self
    }

    #[cfg(feature = "metrics")]
    #[must_use]
    pub fn with_metrics(mut self, prometheus: Option<PrometheusMetrics>) -> Self {
        self.prometheus = prometheus;
        self
    }
}
