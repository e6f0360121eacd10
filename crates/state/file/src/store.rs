use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use vigia_state::error::StateError;
use vigia_state::key::StateKey;
use vigia_state::store::StateStore;

type Entries = BTreeMap<String, String>;

/// [`StateStore`] persisted as a single JSON object on disk.
///
/// Every write rewrites the whole document through a sibling temporary file
/// that is renamed into place, so readers never see a half-written file.
/// Writes from this process are serialized; other processes writing the same
/// file are not coordinated with.
#[derive(Debug)]
pub struct FileStateStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStateStore {
    /// Use `path` as the backing document. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_entries(&self) -> Result<Entries, StateError> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Entries::new()),
            Err(e) => return Err(e.into()),
        };
        if contents.trim().is_empty() {
            return Ok(Entries::new());
        }
        serde_json::from_str(&contents).map_err(|e| {
            StateError::Serialization(format!("{}: {e}", self.path.display()))
        })
    }

    async fn write_entries(&self, entries: &Entries) -> Result<(), StateError> {
        let body = serde_json::to_string_pretty(entries)
            .map_err(|e| StateError::Serialization(e.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        tokio::fs::write(&tmp, body).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        debug!(path = %self.path.display(), keys = entries.len(), "state file written");
        Ok(())
    }
}

#[async_trait]
impl StateStore for FileStateStore {
    async fn get(&self, key: &StateKey) -> Result<Option<String>, StateError> {
        let mut entries = self.read_entries().await?;
        Ok(entries.remove(&key.canonical()))
    }

    async fn set(&self, key: &StateKey, value: &str) -> Result<(), StateError> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.read_entries().await?;
        entries.insert(key.canonical(), value.to_owned());
        self.write_entries(&entries).await
    }
}
