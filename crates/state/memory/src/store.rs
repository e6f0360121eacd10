use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;

use vigia_state::error::StateError;
use vigia_state::key::StateKey;
use vigia_state::store::StateStore;

/// In-memory [`StateStore`] backed by a [`DashMap`].
///
/// An optional byte quota (keys plus values, like browser storage) makes
/// oversize writes fail with [`StateError::CapacityExceeded`], and the store
/// can be switched offline to simulate storage that is disabled.
#[derive(Debug)]
pub struct MemoryStateStore {
    data: DashMap<String, String>,
    quota_bytes: Option<usize>,
    available: AtomicBool,
}

impl Default for MemoryStateStore {
    fn default() -> Self {
        Self {
            data: DashMap::new(),
            quota_bytes: None,
            available: AtomicBool::new(true),
        }
    }
}

impl MemoryStateStore {
    /// Create a new, empty, unbounded store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store that holds at most `quota_bytes`.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            quota_bytes: Some(quota_bytes),
            ..Self::default()
        }
    }

    /// Toggle availability. While unavailable every operation fails.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Bytes in use, excluding the entry at `skip`.
    fn used_bytes_except(&self, skip: &str) -> usize {
        self.data
            .iter()
            .filter(|entry| entry.key() != skip)
            .map(|entry| entry.key().len() + entry.value().len())
            .sum()
    }

    fn ensure_available(&self) -> Result<(), StateError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StateError::Unavailable("memory store is offline".into()))
        }
    }
}

#[async_trait]
impl StateStore for MemoryStateStore {
    async fn get(&self, key: &StateKey) -> Result<Option<String>, StateError> {
        self.ensure_available()?;
        Ok(self.data.get(&key.canonical()).map(|v| v.value().clone()))
    }

    async fn set(&self, key: &StateKey, value: &str) -> Result<(), StateError> {
        self.ensure_available()?;
        let rendered = key.canonical();

        if let Some(limit) = self.quota_bytes {
            let needed = self.used_bytes_except(&rendered) + rendered.len() + value.len();
            if needed > limit {
                return Err(StateError::CapacityExceeded { needed, limit });
            }
        }

        self.data.insert(rendered, value.to_owned());
        Ok(())
    }
}
