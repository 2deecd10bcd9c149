//! Environment detection module

use serde::{Deserialize, Serialize};

/// Deployment environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development (default)
    #[default]
    Development,
    /// Pre-production staging
    Staging,
    /// Production deployment
    Production,
}

impl Environment {
    /// Detect the environment from the `APP_ENV` variable
    ///
    /// Unknown or missing values fall back to `Development`.
    pub fn from_env() -> Self {
        match std::env::var("APP_ENV").as_deref() {
            Ok("production") => Self::Production,
            Ok("staging") => Self::Staging,
            _ => Self::Development,
        }
    }

    /// Whether this is the production environment
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}
