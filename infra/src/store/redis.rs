//! Redis-backed challenge store
//!
//! Stores challenge records as JSON under `otp:challenge:{email}` with a
//! key expiry matching the record's own expiry, so Redis drops stale
//! records even if the service's sweep never runs (e.g. after a restart).

use async_trait::async_trait;
use chrono::Utc;
use redis::aio::MultiplexedConnection;
use redis::Client;
use tracing::{debug, error, info};

use mo_core::domain::entities::OtpChallenge;
use mo_core::repositories::ChallengeStore;
use mo_shared::utils::mask_email;

use crate::InfrastructureError;

/// Redis key prefix for challenge records
const CHALLENGE_KEY_PREFIX: &str = "otp:challenge";

/// Redis-backed challenge store
#[derive(Clone)]
pub struct RedisChallengeStore {
    connection: MultiplexedConnection,
}

impl RedisChallengeStore {
    /// Connect to Redis and create a store
    ///
    /// # Arguments
    ///
    /// * `url` - Redis connection URL, e.g. `redis://localhost:6379`
    pub async fn connect(url: &str) -> Result<Self, InfrastructureError> {
        let client = Client::open(url).map_err(|e| {
            error!("Failed to parse Redis URL: {}", e);
            InfrastructureError::Config(format!("Invalid Redis URL: {}", e))
        })?;

        let connection = client
            .get_multiplexed_tokio_connection()
            .await
            .map_err(|e| {
                error!("Failed to connect to Redis: {}", e);
                InfrastructureError::Store(format!("Redis connection failed: {}", e))
            })?;

        info!("Redis challenge store connected");
        Ok(Self { connection })
    }

    fn format_key(email: &str) -> String {
        format!("{}:{}", CHALLENGE_KEY_PREFIX, email)
    }
}

#[async_trait]
impl ChallengeStore for RedisChallengeStore {
    async fn put(&self, email: &str, challenge: OtpChallenge) -> Result<(), String> {
        let key = Self::format_key(email);
        let json = serde_json::to_string(&challenge)
            .map_err(|e| format!("failed to serialize challenge: {}", e))?;

        // Expire the key alongside the record itself; at least one second
        // so an almost-expired record is still written
        let expiry_secs = (challenge.expires_at - Utc::now()).num_seconds().max(1) as u64;

        let mut conn = self.connection.clone();
        redis::cmd("SET")
            .arg(&key)
            .arg(json)
            .arg("EX")
            .arg(expiry_secs)
            .query_async::<_, ()>(&mut conn)
            .await
            .map_err(|e| format!("redis SET failed: {}", e))?;

        debug!(email = %mask_email(email), "Stored challenge in Redis");
        Ok(())
    }

    async fn get(&self, email: &str) -> Result<Option<OtpChallenge>, String> {
        let key = Self::format_key(email);
        let mut conn = self.connection.clone();

        let json: Option<String> = redis::cmd("GET")
            .arg(&key)
            .query_async(&mut conn)
            .await
            .map_err(|e| format!("redis GET failed: {}", e))?;

        match json {
            Some(json) => {
                let challenge = serde_json::from_str(&json)
                    .map_err(|e| format!("failed to deserialize challenge: {}", e))?;
                Ok(Some(challenge))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, email: &str) -> Result<(), String> {
        let key = Self::format_key(email);
        let mut conn = self.connection.clone();

        redis::cmd("DEL")
            .arg(&key)
            .query_async::<_, ()>(&mut conn)
            .await
            .map_err(|e| format!("redis DEL failed: {}", e))?;

        debug!(email = %mask_email(email), "Deleted challenge from Redis");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_format() {
        assert_eq!(
            RedisChallengeStore::format_key("a@x.com"),
            "otp:challenge:a@x.com"
        );
    }
}
