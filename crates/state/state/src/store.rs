use async_trait::async_trait;

use crate::error::StateError;
use crate::key::StateKey;

/// Local key-value persistence, modelled on browser storage: string keys,
/// string values, whole-value reads and writes.
///
/// There is no compare-and-swap. Callers doing read-modify-write cycles race
/// with any other writer on the same key.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Get the value for a key. Returns `None` if it was never set.
    async fn get(&self, key: &StateKey) -> Result<Option<String>, StateError>;

    /// Set a value, overwriting any previous one.
    async fn set(&self, key: &StateKey, value: &str) -> Result<(), StateError>;
}
