//! Configuration for the OTP lifecycle service

use std::time::Duration;

use mo_shared::config::OtpConfig;

use crate::domain::entities::challenge::{DEFAULT_TTL_SECONDS, MAX_ATTEMPTS};

/// Configuration for the OTP lifecycle service
#[derive(Debug, Clone)]
pub struct OtpServiceConfig {
    /// How long an issued challenge stays valid
    pub ttl: Duration,

    /// Maximum number of verification attempts per challenge
    pub max_attempts: u32,
}

impl Default for OtpServiceConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(DEFAULT_TTL_SECONDS as u64),
            max_attempts: MAX_ATTEMPTS,
        }
    }
}

impl From<&OtpConfig> for OtpServiceConfig {
    fn from(config: &OtpConfig) -> Self {
        Self {
            ttl: config.ttl(),
            max_attempts: config.max_attempts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_policy_constants() {
        let config = OtpServiceConfig::default();
        assert_eq!(config.ttl, Duration::from_secs(300));
        assert_eq!(config.max_attempts, 5);
    }

    #[test]
    fn test_from_shared_config() {
        let shared = OtpConfig {
            ttl_seconds: 120,
            max_attempts: 3,
        };
        let config = OtpServiceConfig::from(&shared);
        assert_eq!(config.ttl, Duration::from_secs(120));
        assert_eq!(config.max_attempts, 3);
    }
}
