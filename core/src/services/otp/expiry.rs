//! Cancellable expiry scheduling
//!
//! Each issued challenge gets a deferred sweep that removes it from the
//! store once its time-to-live elapses. Unlike a fire-and-forget timer, the
//! task handle is tracked per identifier so it can be cancelled when the
//! challenge is consumed early (verified, exhausted, or replaced by a new
//! issuance). A sweep racing an in-flight verify is harmless because store
//! deletion is idempotent and verify re-checks for absence.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

struct Entry {
    generation: u64,
    handle: JoinHandle<()>,
}

/// Registry of pending expiry sweeps, keyed by identifier
#[derive(Default)]
pub struct ExpirySchedule {
    tasks: Arc<Mutex<HashMap<String, Entry>>>,
    next_generation: Mutex<u64>,
}

impl ExpirySchedule {
    /// Create an empty schedule
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `on_expire` to run after `delay`, replacing any sweep
    /// already pending for `key`
    pub fn schedule<F>(&self, key: &str, delay: Duration, on_expire: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let generation = {
            let mut next = self.next_generation.lock().unwrap_or_else(|e| e.into_inner());
            *next += 1;
            *next
        };

        let registry = Arc::clone(&self.tasks);
        let task_key = key.to_string();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            on_expire.await;

            // Deregister ourselves, but only if a newer sweep has not been
            // scheduled for the same identifier in the meantime
            let mut tasks = registry.lock().unwrap_or_else(|e| e.into_inner());
            if tasks
                .get(&task_key)
                .is_some_and(|entry| entry.generation == generation)
            {
                tasks.remove(&task_key);
            }
        });

        let mut tasks = self.tasks.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(previous) = tasks.insert(key.to_string(), Entry { generation, handle }) {
            previous.handle.abort();
        }
    }

    /// Cancel the pending sweep for `key`, if any
    pub fn cancel(&self, key: &str) {
        let mut tasks = self.tasks.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(entry) = tasks.remove(key) {
            entry.handle.abort();
        }
    }

    /// Whether a sweep is currently pending for `key`
    pub fn is_scheduled(&self, key: &str) -> bool {
        self.tasks
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains_key(key)
    }
}
