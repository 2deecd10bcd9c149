//! OTP policy configuration module

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default challenge time-to-live in seconds (5 minutes)
pub const DEFAULT_TTL_SECONDS: u64 = 300;

/// Default maximum number of verification attempts per challenge
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// OTP policy configuration
///
/// Controls how long an issued challenge stays valid and how many incorrect
/// submissions are tolerated before the challenge is invalidated.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OtpConfig {
    /// Challenge time-to-live in seconds
    pub ttl_seconds: u64,

    /// Maximum number of verification attempts per challenge
    pub max_attempts: u32,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: DEFAULT_TTL_SECONDS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl OtpConfig {
    /// Load the OTP policy from `OTP_TTL_SECONDS` / `OTP_MAX_ATTEMPTS`
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            ttl_seconds: std::env::var("OTP_TTL_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.ttl_seconds),
            max_attempts: std::env::var("OTP_MAX_ATTEMPTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_attempts),
        }
    }

    /// The challenge time-to-live as a `Duration`
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }
}
