use std::env;
use std::net::SocketAddr;

use anyhow::{anyhow, Context};

const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Which wire protocol the warehouse speaks, taken from the URL scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Postgres,
    MySql,
}

impl Backend {
    pub fn from_url(url: &str) -> anyhow::Result<Self> {
        let scheme = url
            .split_once("://")
            .map(|(scheme, _)| scheme.to_lowercase())
            .ok_or_else(|| anyhow!("warehouse URL has no scheme"))?;
        match scheme.as_str() {
            "postgres" | "postgresql" => Ok(Backend::Postgres),
            "mysql" => Ok(Backend::MySql),
            other => Err(anyhow!("Unsupported warehouse type: {}", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct WarehouseConfig {
    pub url: String,
    pub backend: Backend,
    pub max_connections: u32,
    pub bind_addr: SocketAddr,
}

impl WarehouseConfig {
    /// Reads `WAREHOUSE_URL`, `WAREHOUSE_MAX_CONNECTIONS` and `BIND_ADDR`.
    /// Call `dotenvy::dotenv()` first if a `.env` file should be honoured.
    pub fn from_env() -> anyhow::Result<Self> {
        let url = env::var("WAREHOUSE_URL").context("WAREHOUSE_URL must be set")?;
        let max_connections = env::var("WAREHOUSE_MAX_CONNECTIONS").ok();
        let bind_addr = env::var("BIND_ADDR").ok();
        Self::from_parts(url, max_connections.as_deref(), bind_addr.as_deref())
    }

    pub fn from_parts(
        url: String,
        max_connections: Option<&str>,
        bind_addr: Option<&str>,
    ) -> anyhow::Result<Self> {
        let backend = Backend::from_url(&url)?;
        let max_connections = match max_connections {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("invalid WAREHOUSE_MAX_CONNECTIONS: {}", raw))?,
            None => DEFAULT_MAX_CONNECTIONS,
        };
        let bind_addr = bind_addr
            .unwrap_or(DEFAULT_BIND_ADDR)
            .parse()
            .context("invalid BIND_ADDR")?;

        Ok(Self {
            url,
            backend,
            max_connections,
            bind_addr,
        })
    }
}
