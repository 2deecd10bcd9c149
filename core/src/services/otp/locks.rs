//! Per-identifier lock registry
//!
//! Read-modify-write sequences on a single identifier's challenge (attempt
//! increment, expiry deletion, issuance overwrite) must be atomic with
//! respect to other operations on the same identifier, while operations on
//! different identifiers proceed independently. A keyed mutex map gives
//! exactly that. Entries are evicted when the last holder releases, so the
//! registry never grows with the set of identifiers ever seen.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

type Registry = Arc<Mutex<HashMap<String, Arc<AsyncMutex<()>>>>>;

/// Registry of per-identifier async locks
#[derive(Default)]
pub struct IdentifierLocks {
    locks: Registry,
}

/// Held lock for one identifier
///
/// Dropping the guard releases the lock and removes the registry entry if
/// no other operation on the same identifier is waiting for it.
pub struct IdentifierGuard {
    registry: Registry,
    key: String,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for IdentifierGuard {
    fn drop(&mut self) {
        // Release the mutex before inspecting the registry; waiters hold
        // their own clone of the Arc, so a count of one means the registry
        // copy is the only one left
        self.guard.take();
        let mut locks = self.registry.lock().unwrap_or_else(|e| e.into_inner());
        let unused = locks
            .get(&self.key)
            .is_some_and(|lock| Arc::strong_count(lock) == 1);
        if unused {
            locks.remove(&self.key);
        }
    }
}

impl IdentifierLocks {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the lock for `key`, waiting if another operation on the same
    /// identifier is in flight
    ///
    /// The guard must be dropped before any long-running external call
    /// (mail delivery) so the identifier is not blocked while I/O is in
    /// flight.
    pub async fn acquire(&self, key: &str) -> IdentifierGuard {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
            Arc::clone(
                locks
                    .entry(key.to_string())
                    .or_insert_with(|| Arc::new(AsyncMutex::new(()))),
            )
        };
        let guard = lock.lock_owned().await;
        IdentifierGuard {
            registry: Arc::clone(&self.locks),
            key: key.to_string(),
            guard: Some(guard),
        }
    }

    /// Number of identifiers currently holding or waiting for a lock
    pub fn len(&self) -> usize {
        self.locks.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Whether no identifier currently holds or waits for a lock
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
