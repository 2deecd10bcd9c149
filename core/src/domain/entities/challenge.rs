//! Challenge record entity for email-based OTP verification.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use rand::{rngs::OsRng, Rng};
use serde::{Deserialize, Serialize};

/// Maximum number of verification attempts allowed per challenge
pub const MAX_ATTEMPTS: u32 = 5;

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Lowest code value (inclusive); keeps every code six digits long
pub const CODE_MIN: u32 = 100_000;

/// Highest code value (inclusive)
pub const CODE_MAX: u32 = 999_999;

/// Default challenge time-to-live in seconds (5 minutes)
pub const DEFAULT_TTL_SECONDS: i64 = 300;

/// Challenge record for email-based OTP verification
///
/// One outstanding challenge exists per email address at most; issuing a new
/// challenge for the same address replaces the previous record entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpChallenge {
    /// Email address this challenge was issued for (keyed literally,
    /// case-sensitive)
    pub email: String,

    /// The 6-digit verification code
    pub code: String,

    /// Number of failed verification attempts made so far
    pub attempts: u32,

    /// Timestamp when the challenge was created (immutable once set)
    pub created_at: DateTime<Utc>,

    /// Timestamp when the challenge expires
    pub expires_at: DateTime<Utc>,
}

impl OtpChallenge {
    /// Creates a new challenge with a cryptographically random 6-digit code
    ///
    /// # Arguments
    ///
    /// * `email` - The address the code will be delivered to
    /// * `ttl` - How long the challenge stays valid
    pub fn new(email: impl Into<String>, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            email: email.into(),
            code: Self::generate_code(),
            attempts: 0,
            created_at: now,
            expires_at: now + ttl,
        }
    }

    /// Creates a new challenge with the default 5-minute time-to-live
    pub fn with_default_ttl(email: impl Into<String>) -> Self {
        Self::new(email, Duration::seconds(DEFAULT_TTL_SECONDS))
    }

    /// Generates a uniformly random code in `[CODE_MIN, CODE_MAX]`
    ///
    /// Uses the OS CSPRNG. The lower bound guarantees six digits, so the
    /// string rendering never needs zero padding.
    fn generate_code() -> String {
        let code: u32 = OsRng.gen_range(CODE_MIN..=CODE_MAX);
        code.to_string()
    }

    /// Checks if the challenge has expired
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Checks if the attempt budget has been used up
    pub fn is_exhausted(&self, max_attempts: u32) -> bool {
        self.attempts >= max_attempts
    }

    /// Compares a submitted code against this challenge's code
    ///
    /// Uses a constant-time comparison to avoid leaking where the codes
    /// diverge.
    pub fn matches(&self, submitted_code: &str) -> bool {
        self.code.len() == submitted_code.len()
            && constant_time_eq(self.code.as_bytes(), submitted_code.as_bytes())
    }

    /// Records a failed verification attempt
    pub fn register_mismatch(&mut self) {
        self.attempts += 1;
    }

    /// Gets the number of remaining verification attempts (floored at 0)
    pub fn remaining_attempts(&self, max_attempts: u32) -> u32 {
        max_attempts.saturating_sub(self.attempts)
    }
}
