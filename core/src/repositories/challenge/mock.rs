//! Mock implementation of ChallengeStore for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::OtpChallenge;

use super::trait_::ChallengeStore;

/// Mock challenge store for testing
///
/// Keeps records in a plain in-process map and can be switched into a
/// failing mode to exercise internal-error paths.
#[derive(Clone)]
pub struct MockChallengeStore {
    records: Arc<RwLock<HashMap<String, OtpChallenge>>>,
    should_fail: bool,
}

impl MockChallengeStore {
    /// Create a new mock store
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            should_fail: false,
        }
    }

    /// Create a mock store whose every operation fails
    pub fn failing() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            should_fail: true,
        }
    }

    /// Number of records currently held
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether the store currently holds no records
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Peek at a stored record without going through the trait
    pub async fn peek(&self, email: &str) -> Option<OtpChallenge> {
        self.records.read().await.get(email).cloned()
    }
}

impl Default for MockChallengeStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChallengeStore for MockChallengeStore {
    async fn put(&self, email: &str, challenge: OtpChallenge) -> Result<(), String> {
        if self.should_fail {
            return Err("challenge store error".to_string());
        }
        self.records
            .write()
            .await
            .insert(email.to_string(), challenge);
        Ok(())
    }

    async fn get(&self, email: &str) -> Result<Option<OtpChallenge>, String> {
        if self.should_fail {
            return Err("challenge store error".to_string());
        }
        Ok(self.records.read().await.get(email).cloned())
    }

    async fn delete(&self, email: &str) -> Result<(), String> {
        if self.should_fail {
            return Err("challenge store error".to_string());
        }
        self.records.write().await.remove(email);
        Ok(())
    }
}
