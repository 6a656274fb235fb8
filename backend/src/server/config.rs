//! Application settings loaded via OrthoConfig, and the server configuration
//! derived from them.
//!
//! Every setting can come from a CLI flag, a `TASKBOARD_*` environment
//! variable or a config file. Absent values fall back to the defaults below.

use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use taskboard::domain::DEFAULT_OPERATION_TIMEOUT;
use taskboard::inbound::http::state::HttpState;
use taskboard::outbound::credentials::DEFAULT_BCRYPT_COST;
use tracing::warn;
use uuid::Uuid;
use zeroize::Zeroizing;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// Failures turning raw settings into usable values.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address {value:?}: {message}")]
    BindAddr { value: String, message: String },
    #[error("jwt_secret is required unless allow_ephemeral_secret is set")]
    MissingJwtSecret,
}

/// Runtime settings.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TASKBOARD")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL; the in-memory stores are used when absent.
    pub database_url: Option<String>,
    /// Redis URL; the in-memory cache is used when absent.
    pub redis_url: Option<String>,
    /// HMAC key for access tokens.
    pub jwt_secret: Option<String>,
    /// Generate a random signing key when `jwt_secret` is unset.
    #[ortho_config(default = false)]
    pub allow_ephemeral_secret: bool,
    /// bcrypt work factor.
    pub bcrypt_cost: Option<u32>,
    /// Budget for each store or cache call, in seconds.
    pub request_timeout_secs: Option<u64>,
    /// PostgreSQL pool size.
    pub db_max_connections: Option<u32>,
    /// Apply pending migrations before serving.
    #[ortho_config(default = true)]
    pub run_migrations: bool,
}

impl fmt::Debug for AppSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppSettings")
            .field("bind_addr", &self.bind_addr)
            .field("database_url", &self.database_url.as_ref().map(|_| "<set>"))
            .field("redis_url", &self.redis_url.as_ref().map(|_| "<set>"))
            .field("jwt_secret", &self.jwt_secret.as_ref().map(|_| "<redacted>"))
            .field("allow_ephemeral_secret", &self.allow_ephemeral_secret)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("db_max_connections", &self.db_max_connections)
            .field("run_migrations", &self.run_migrations)
            .finish()
    }
}

impl AppSettings {
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|err: std::net::AddrParseError| SettingsError::BindAddr {
            value: raw.to_owned(),
            message: err.to_string(),
        })
    }

    pub fn bcrypt_cost(&self) -> u32 {
        self.bcrypt_cost.unwrap_or(DEFAULT_BCRYPT_COST)
    }

    /// Zero is treated as unset.
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map_or(DEFAULT_OPERATION_TIMEOUT, Duration::from_secs)
    }

    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
            .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }

    /// Signing key for access tokens.
    ///
    /// An ephemeral key invalidates every token on restart, so it is only
    /// produced when explicitly allowed.
    pub fn jwt_secret(&self) -> Result<Zeroizing<Vec<u8>>, SettingsError> {
        match self.jwt_secret.as_deref().filter(|secret| !secret.is_empty()) {
            Some(secret) => Ok(Zeroizing::new(secret.as_bytes().to_vec())),
            None if self.allow_ephemeral_secret => {
                warn!("using an ephemeral jwt secret; tokens will not survive a restart");
                let mut key = Uuid::new_v4().as_bytes().to_vec();
                key.extend_from_slice(Uuid::new_v4().as_bytes());
                Ok(Zeroizing::new(key))
            }
            None => Err(SettingsError::MissingJwtSecret),
        }
    }
}

/// Everything `create_server` needs.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) http_state: HttpState,
}

impl ServerConfig {
    #[must_use]
    pub fn new(bind_addr: SocketAddr, http_state: HttpState) -> Self {
        Self {
            bind_addr,
            http_state,
        }
    }
}
