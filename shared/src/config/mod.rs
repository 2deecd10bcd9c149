//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `environment` - Environment detection
//! - `mail` - Mail delivery provider configuration
//! - `otp` - OTP policy (time-to-live, attempt budget)
//! - `server` - HTTP server configuration

pub mod environment;
pub mod mail;
pub mod otp;
pub mod server;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use environment::Environment;
pub use mail::{MailConfig, MailProvider};
pub use otp::OtpConfig;
pub use server::ServerConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// HTTP server configuration
    pub server: ServerConfig,

    /// OTP policy configuration
    pub otp: OtpConfig,

    /// Mail delivery configuration
    pub mail: MailConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            server: ServerConfig::default(),
            otp: OtpConfig::default(),
            mail: MailConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load the full configuration from environment variables
    ///
    /// Every field falls back to its default when the corresponding variable
    /// is unset or unparseable.
    pub fn from_env() -> Self {
        Self {
            environment: Environment::from_env(),
            server: ServerConfig::from_env(),
            otp: OtpConfig::from_env(),
            mail: MailConfig::from_env(),
        }
    }
}
