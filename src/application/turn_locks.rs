//! Keyed asynchronous locks.
//!
//! Serializes critical sections per key while letting unrelated keys
//! proceed in parallel. Used for the per-(participant, agent) turn lock
//! and the per-agent metrics lock.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

/// Map of independently acquirable locks, one per key.
///
/// Entries are created on first use and kept for the life of the map, so
/// every acquisition of the same key contends on the same lock.
pub struct KeyedLocks<K> {
    locks: Mutex<HashMap<K, Arc<Mutex<()>>>>,
}

impl<K> KeyedLocks<K>
where
    K: Eq + Hash,
{
    /// Creates an empty lock map.
    pub fn new() -> Self {
        Self {
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Acquires the lock for `key`, waiting if another holder has it.
    ///
    /// The returned guard must be held for the whole critical section.
    pub async fn acquire(&self, key: K) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            Arc::clone(locks.entry(key).or_default())
        };
        lock.lock_owned().await
    }
}

impl<K> Default for KeyedLocks<K>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}
