//! Command-line and environment configuration for the server.
//!
//! Every flag falls back to an environment variable, so the binary can be
//! configured entirely from a `.env` file.

use std::net::SocketAddr;
use std::time::Duration;

use clap::Parser;

use crate::http::HttpConfig;

/// Server settings.
#[derive(Debug, Clone, Parser)]
#[command(author, version, about)]
pub struct ServerConfig {
    /// Socket address to listen on.
    #[arg(long, env = "JAG_ATLAS_BIND", default_value = "0.0.0.0:8083")]
    pub bind: SocketAddr,

    /// `PostgreSQL` URL; the in-memory store is used when absent.
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Maximum pooled database connections.
    #[arg(long, env = "JAG_ATLAS_POOL_SIZE", default_value_t = 10)]
    pub pool_size: u32,

    /// Seconds allowed per request before it is abandoned.
    #[arg(long, env = "JAG_ATLAS_REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    pub request_timeout_secs: u64,

    /// Single origin allowed by CORS; any origin when absent.
    #[arg(long, env = "JAG_ATLAS_CORS_ORIGIN")]
    pub cors_origin: Option<String>,

    /// Default log level, overridden by `RUST_LOG`.
    #[arg(short, long, env = "JAG_ATLAS_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Create missing tables before serving.
    #[arg(long, env = "JAG_ATLAS_CREATE_TABLES")]
    pub create_tables: bool,
}

impl ServerConfig {
    /// Per-request timeout.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Transport settings derived from these flags.
    #[must_use]
    pub fn http(&self) -> HttpConfig {
        HttpConfig {
            request_timeout: self.request_timeout(),
            cors_origin: self.cors_origin.clone(),
        }
    }
}
