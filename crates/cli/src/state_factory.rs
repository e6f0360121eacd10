use std::sync::Arc;

use anyhow::bail;
use tracing::debug;

use vigia_core::{Clock, IdGenerator, MillisIdGenerator, SequenceIdGenerator, SystemClock};
use vigia_form::{ReportForm, ReportFormBuilder, ReportStore};
use vigia_state::{StateKey, StateStore};
use vigia_state_file::FileStateStore;
use vigia_state_memory::MemoryStateStore;

use crate::config::{IdStrategy, StorageConfig, VigiaConfig};

/// Construct a `StateStore` from configuration.
pub fn create_state(config: &StorageConfig) -> anyhow::Result<Arc<dyn StateStore>> {
    match config.backend.as_str() {
        "file" => Ok(Arc::new(FileStateStore::new(&config.path))),
        "memory" => Ok(match config.quota_bytes {
            Some(quota) => Arc::new(MemoryStateStore::with_quota(quota)),
            None => Arc::new(MemoryStateStore::new()),
        }),
        other => bail!("unsupported storage backend: {other}"),
    }
}

/// The storage key configured for the report list.
pub fn report_key(config: &StorageConfig) -> StateKey {
    let key = StateKey::new(config.key.clone());
    match &config.prefix {
        Some(prefix) => key.with_prefix(prefix.clone()),
        None => key,
    }
}

/// Build the report form, continuing identifiers after those already stored.
pub async fn open_form(config: &VigiaConfig) -> anyhow::Result<ReportForm> {
    let state = create_state(&config.storage)?;
    let key = report_key(&config.storage);
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let existing = ReportStore::new(
        Arc::clone(&state),
        key.clone(),
        Arc::new(SequenceIdGenerator::default()),
        Arc::clone(&clock),
    );
    let last_id = existing.max_id().await?;
    debug!(?last_id, strategy = ?config.ids.strategy, "resuming report ids");

    let ids: Arc<dyn IdGenerator> = match config.ids.strategy {
        IdStrategy::Millis => Arc::new(
            MillisIdGenerator::new(Arc::clone(&clock)).resume_after(last_id.unwrap_or(0)),
        ),
        IdStrategy::Sequence => Arc::new(SequenceIdGenerator::starting_at(
            last_id.map_or(1, |id| id + 1),
        )),
    };

    let form = ReportFormBuilder::new()
        .state(state)
        .key(key)
        .clock(clock)
        .ids(ids)
        .bounds(config.map.bounds())
        .max_file_bytes(config.attachments.max_file_bytes)
        .dismiss_after(config.feedback.dismiss_after())
        .build()?;
    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_backend_is_rejected() {
        let config = StorageConfig {
            backend: "redis".into(),
            ..StorageConfig::default()
        };
        let err = create_state(&config).err().unwrap();
        assert!(err.to_string().contains("redis"));
    }

    #[test]
    fn prefix_is_applied_to_key() {
        let config = StorageConfig {
            prefix: Some("soacha".into()),
            ..StorageConfig::default()
        };
        assert_eq!(report_key(&config).canonical(), "soacha:communityReports");
    }

    #[tokio::test]
    async fn sequence_ids_continue_after_stored_reports() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = VigiaConfig::default();
        config.storage.path = dir.path().join("data.json").display().to_string();
        config.ids.strategy = IdStrategy::Sequence;

        let mut form = open_form(&config).await.unwrap();
        form.set_event_type("flood");
        form.set_latitude("4.5800");
        form.set_longitude("-74.2100");
        form.set_description("first");
        assert_eq!(form.submit().await.unwrap().id, 1);

        let mut form = open_form(&config).await.unwrap();
        form.set_event_type("flood");
        form.set_latitude("4.5800");
        form.set_longitude("-74.2100");
        form.set_description("second");
        assert_eq!(form.submit().await.unwrap().id, 2);
        assert_eq!(form.store().load().await.unwrap().len(), 2);
    }
}
