//! Small bounded least-recently-used cache.
//!
//! Entries live in a deque ordered from least to most recently used. The
//! caches in this crate hold a few dozen entries, so a linear scan is fine.

use std::collections::VecDeque;

use tokio::sync::Mutex;
use tracing::trace;

#[derive(Debug)]
pub struct LruCache<K, V> {
    capacity: usize,
    entries: Mutex<VecDeque<(K, V)>>,
}

impl<K, V> LruCache<K, V>
where
    K: PartialEq + std::fmt::Debug,
    V: Clone,
{
    /// A cache holding at most `capacity` entries. Zero disables caching.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }

    /// Return a clone of the cached value and mark it most recently used.
    pub async fn get(&self, key: &K) -> Option<V> {
        let mut entries = self.entries.lock().await;
        let pos = entries.iter().position(|(k, _)| k == key)?;
        let entry = entries.remove(pos)?;
        let value = entry.1.clone();
        entries.push_back(entry);
        trace!(?key, "cache hit");
        Some(value)
    }

    /// Insert or replace `key`, evicting the least recently used entry when
    /// over capacity.
    pub async fn insert(&self, key: K, value: V) {
        if self.capacity == 0 {
            return;
        }
        let mut entries = self.entries.lock().await;
        if let Some(pos) = entries.iter().position(|(k, _)| *k == key) {
            entries.remove(pos);
        }
        entries.push_back((key, value));
        while entries.len() > self.capacity {
            if let Some((evicted, _)) = entries.pop_front() {
                trace!(key = ?evicted, "cache eviction");
            }
        }
    }
}
