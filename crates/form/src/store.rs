use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};

use vigia_core::{Clock, IdGenerator, Report, ReportDraft, format_timestamp};
use vigia_state::{StateKey, StateStore};

use crate::error::StoreError;

/// Append-only list of reports kept under one key of a [`StateStore`].
///
/// Stored records are kept as raw JSON when appending, so fields added by
/// other writers and records of another shape survive untouched.
///
/// `append` is a read-modify-write of the whole list with no concurrency
/// guard: two writers appending at once can lose one report. The form only
/// ever has one submission in flight, so this is accepted.
#[derive(Clone)]
pub struct ReportStore {
    state: Arc<dyn StateStore>,
    key: StateKey,
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
}

impl ReportStore {
    pub fn new(
        state: Arc<dyn StateStore>,
        key: StateKey,
        ids: Arc<dyn IdGenerator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            state,
            key,
            ids,
            clock,
        }
    }

    pub fn key(&self) -> &StateKey {
        &self.key
    }

    /// Every persisted report, oldest first. A missing key is an empty list.
    ///
    /// Records that do not read as a [`Report`] are skipped.
    pub async fn load(&self) -> Result<Vec<Report>, StoreError> {
        let reports = self
            .records()
            .await?
            .into_iter()
            .enumerate()
            .filter_map(|(index, record)| {
                serde_json::from_value::<Report>(record)
                    .inspect_err(|e| {
                        warn!(key = %self.key, index, error = %e, "skipping unreadable report");
                    })
                    .ok()
            })
            .collect();
        Ok(reports)
    }

    /// Look up a persisted report by identifier.
    pub async fn get(&self, id: u64) -> Result<Option<Report>, StoreError> {
        Ok(self.load().await?.into_iter().find(|r| r.id == id))
    }

    /// Largest numeric `id` among the stored records, whatever their shape.
    pub async fn max_id(&self) -> Result<Option<u64>, StoreError> {
        Ok(self
            .records()
            .await?
            .iter()
            .filter_map(|record| record.get("id").and_then(Value::as_u64))
            .max())
    }

    /// Stamp `draft` with an id and submission time and append it.
    pub async fn append(&self, draft: ReportDraft) -> Result<Report, StoreError> {
        let mut records = self.records().await?;
        debug!(key = %self.key, existing = records.len(), "appending report");

        let report = Report::from_draft(
            draft,
            self.ids.next_id(),
            format_timestamp(self.clock.now_utc()),
        );
        records.push(serde_json::to_value(&report).map_err(StoreError::Encode)?);

        let encoded = serde_json::to_string(&records).map_err(StoreError::Encode)?;
        self.state.set(&self.key, &encoded).await?;

        info!(
            id = report.id,
            event_type = %report.event_type,
            attachments = report.files.len(),
            "report persisted"
        );
        Ok(report)
    }

    async fn records(&self) -> Result<Vec<Value>, StoreError> {
        match self.state.get(&self.key).await? {
            Some(raw) => serde_json::from_str(&raw).map_err(StoreError::Corrupt),
            None => Ok(Vec::new()),
        }
    }
}
