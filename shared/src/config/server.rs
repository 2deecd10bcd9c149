//! HTTP server configuration module

use serde::{Deserialize, Serialize};

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Host address to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    /// Create a server configuration with explicit host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Load the server configuration from `SERVER_HOST` / `SERVER_PORT`
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("SERVER_HOST").unwrap_or(defaults.host),
            port: std::env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
        }
    }

    /// The address string to bind the HTTP server to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
