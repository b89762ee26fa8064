//! Server configuration.

use std::net::SocketAddr;

use crate::error::{ServerError, ServerResult};

/// Environment variable naming the listen address.
pub const ADDR_VAR: &str = "SIDESHEET_ADDR";
/// Environment variable naming the SQLite database path.
pub const DB_VAR: &str = "SIDESHEET_DB";

/// Default listen address.
const DEFAULT_ADDR: &str = "127.0.0.1:8098";
/// Default database path, relative to the working directory.
const DEFAULT_DB_PATH: &str = "sidesheet.db";

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener on.
    pub addr: SocketAddr,

    /// Path to the SQLite database file.
    pub db_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR.parse().expect("valid default listen address"),
            db_path: DEFAULT_DB_PATH.to_string(),
        }
    }
}

impl ServerConfig {
    /// Loads the configuration from the process environment, falling back
    /// to defaults for unset variables.
    pub fn from_env() -> ServerResult<Self> {
        let mut config = Self::default();

        if let Ok(addr) = std::env::var(ADDR_VAR) {
            config.addr = addr
                .parse()
                .map_err(|_| ServerError::config(format!("invalid {ADDR_VAR}: {addr}")))?;
        }

        if let Ok(db_path) = std::env::var(DB_VAR) {
            config.db_path = db_path;
        }

        Ok(config)
    }

    /// Builder: set the listen address.
    pub fn with_addr(mut self, addr: SocketAddr) -> Self {
        self.addr = addr;
        self
    }

    /// Builder: set the database path.
    pub fn with_db_path(mut self, db_path: impl Into<String>) -> Self {
        self.db_path = db_path.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.addr.port(), 8098);
        assert_eq!(config.db_path, "sidesheet.db");
    }

    #[test]
    fn builders() {
        let addr: SocketAddr = "0.0.0.0:9000".parse().unwrap();
        let config = ServerConfig::default()
            .with_addr(addr)
            .with_db_path("/tmp/events.db");
        assert_eq!(config.addr, addr);
        assert_eq!(config.db_path, "/tmp/events.db");
    }
}
