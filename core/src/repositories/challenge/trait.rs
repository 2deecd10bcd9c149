//! Challenge store trait definition

use async_trait::async_trait;

use crate::domain::entities::OtpChallenge;

/// Authoritative keyed repository for challenge records
///
/// The store exclusively owns all challenge records; callers never cache
/// them. At most one record exists per email address. All three operations
/// are infallible at the domain level - an `Err` only signals an
/// infrastructure failure (I/O, serialization), which the service surfaces
/// as an internal error.
#[async_trait]
pub trait ChallengeStore: Send + Sync {
    /// Unconditionally replace any existing record for `email`
    async fn put(&self, email: &str, challenge: OtpChallenge) -> Result<(), String>;

    /// Read-only lookup; absence is `Ok(None)`, never an error
    async fn get(&self, email: &str) -> Result<Option<OtpChallenge>, String>;

    /// Remove the record if present; idempotent, absent key is success
    async fn delete(&self, email: &str) -> Result<(), String>;
}
