//! In-process serialization keyed by string.
//!
//! Attach resolves "does an equivalent code exist" and then creates one.
//! Holding the key's lock across both steps keeps two concurrent scans of
//! the same code from each creating a record.
//! Player-set changes on an existing record take the same key, so a
//! membership read stays valid until the matching write lands.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::trace;
use xxhash_rust::xxh3::xxh3_64;

pub fn lock_id(key: &str) -> u64 {
    xxh3_64(key.as_bytes())
}

/// One async mutex per key, created on demand and pruned when idle.
///
/// Keys are hashed, so two distinct keys may share a mutex. That only
/// serializes more than necessary.
#[derive(Debug, Default)]
pub struct KeyedLocks {
    locks: DashMap<u64, Arc<Mutex<()>>>,
}

impl KeyedLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `key`.
    pub async fn lock(&self, key: &str) -> KeyedGuard<'_> {
        let id = lock_id(key);
        let mutex = {
            let entry = self
                .locks
                .entry(id)
                .or_insert_with(|| Arc::new(Mutex::new(())));
            Arc::clone(entry.value())
        };

        let guard = mutex.lock_owned().await;
        trace!(key, lock_id = id, "keyed lock acquired");

        KeyedGuard {
            owner: self,
            id,
            guard: Some(guard),
        }
    }

    /// Number of keys currently tracked.
    pub fn tracked(&self) -> usize {
        self.locks.len()
    }
}

/// Held lock for one key. Dropping it releases the key.
pub struct KeyedGuard<'a> {
    owner: &'a KeyedLocks,
    id: u64,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for KeyedGuard<'_> {
    fn drop(&mut self) {
        drop(self.guard.take());
        // Only the map still references the mutex: nobody holds or waits on it.
        self.owner
            .locks
            .remove_if(&self.id, |_, mutex| Arc::strong_count(mutex) == 1);
    }
}
