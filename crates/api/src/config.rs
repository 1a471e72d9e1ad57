use std::path::PathBuf;
use std::time::Duration;

use playerdesk_core::store::DEFAULT_CALL_TIMEOUT;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Connection pool capacity (default: `10`).
    pub db_max_connections: u32,
    /// Maximum wait for a pooled connection in seconds (default: `10`).
    pub db_acquire_timeout_secs: u64,
    /// Upper bound on any single store call in milliseconds (default: `5000`).
    pub store_timeout_ms: u64,
    /// Shared secret for `POST /api/logs`. Ingestion is refused when unset.
    pub log_api_key: Option<String>,
    /// Dashboard build directory served for non-API paths.
    pub static_dir: Option<PathBuf>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                 |
    /// |---------------------------|-------------------------|
    /// | `HOST`                    | `0.0.0.0`               |
    /// | `PORT`                    | `3000`                  |
    /// | `CORS_ORIGINS`            | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                    |
    /// | `DB_MAX_CONNECTIONS`      | `10`                    |
    /// | `DB_ACQUIRE_TIMEOUT_SECS` | `10`                    |
    /// | `STORE_TIMEOUT_MS`        | `5000`                  |
    /// | `LOG_API_KEY`             | unset                   |
    /// | `STATIC_DIR`              | unset                   |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let db_max_connections: u32 = std::env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".into())
            .parse()
            .expect("DB_MAX_CONNECTIONS must be a valid u32");

        let db_acquire_timeout_secs: u64 = std::env::var("DB_ACQUIRE_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".into())
            .parse()
            .expect("DB_ACQUIRE_TIMEOUT_SECS must be a valid u64");

        let store_timeout_ms: u64 = match std::env::var("STORE_TIMEOUT_MS") {
            Ok(value) => value.parse().expect("STORE_TIMEOUT_MS must be a valid u64"),
            Err(_) => default_store_timeout_ms(),
        };

        let log_api_key = std::env::var("LOG_API_KEY")
            .ok()
            .filter(|key| !key.is_empty());

        let static_dir = std::env::var("STATIC_DIR").ok().map(PathBuf::from);

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            db_max_connections,
            db_acquire_timeout_secs,
            store_timeout_ms,
            log_api_key,
            static_dir,
        }
    }

    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }

    pub fn db_acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.db_acquire_timeout_secs)
    }
}

fn default_store_timeout_ms() -> u64 {
    DEFAULT_CALL_TIMEOUT.as_millis() as u64
}
