//! In-memory challenge store
//!
//! A passive keyed container behind a read-write lock. Per-identifier
//! atomicity across read-modify-write sequences is the OTP service's
//! responsibility; the store only guarantees that individual operations are
//! consistent.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use mo_core::domain::entities::OtpChallenge;
use mo_core::repositories::ChallengeStore;

/// In-memory challenge store
///
/// Holds all live challenge records in a process-local map. Constructed at
/// service start and injected, so tests get isolated instances and the
/// backend can be swapped without touching the OTP service.
#[derive(Default)]
pub struct MemoryChallengeStore {
    records: RwLock<HashMap<String, OtpChallenge>>,
}

impl MemoryChallengeStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live records, for diagnostics
    pub fn len(&self) -> usize {
        self.records
            .read()
            .map(|records| records.len())
            .unwrap_or(0)
    }

    /// Whether the store holds no records
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ChallengeStore for MemoryChallengeStore {
    async fn put(&self, email: &str, challenge: OtpChallenge) -> Result<(), String> {
        let mut records = self
            .records
            .write()
            .map_err(|_| "challenge store lock poisoned".to_string())?;
        records.insert(email.to_string(), challenge);
        Ok(())
    }

    async fn get(&self, email: &str) -> Result<Option<OtpChallenge>, String> {
        let records = self
            .records
            .read()
            .map_err(|_| "challenge store lock poisoned".to_string())?;
        Ok(records.get(email).cloned())
    }

    async fn delete(&self, email: &str) -> Result<(), String> {
        let mut records = self
            .records
            .write()
            .map_err(|_| "challenge store lock poisoned".to_string())?;
        records.remove(email);
        Ok(())
    }
}
