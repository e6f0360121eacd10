use std::sync::Arc;
use std::time::Duration;

use vigia_core::{
    AttachmentPolicy, Clock, IdGenerator, MapBounds, MillisIdGenerator, SequenceIdGenerator,
    SystemClock,
};
use vigia_state::{StateKey, StateStore};

use crate::error::FormError;
use crate::feedback::{DEFAULT_DISMISS_AFTER, FeedbackController};
use crate::form::ReportForm;
use crate::store::ReportStore;

/// Fluent builder for constructing a [`ReportForm`].
///
/// A [`StateStore`] must be supplied. Everything else has a default: system clock, millisecond identifiers, the
/// `communityReports` key, the Soacha map box, a 10 MiB attachment limit and
/// a 5 s banner delay.
pub struct ReportFormBuilder {
    state: Option<Arc<dyn StateStore>>,
    clock: Option<Arc<dyn Clock>>,
    ids: Option<Arc<dyn IdGenerator>>,
    key: StateKey,
    bounds: MapBounds,
    policy: AttachmentPolicy,
    dismiss_after: Duration,
}

impl ReportFormBuilder {
    pub fn new() -> Self {
        Self {
            state: None,
            clock: None,
            ids: None,
            key: StateKey::reports(),
            bounds: MapBounds::default(),
            policy: AttachmentPolicy::default(),
            dismiss_after: DEFAULT_DISMISS_AFTER,
        }
    }

    /// Set the persistence backend.
    #[must_use]
    pub fn state(mut self, store: Arc<dyn StateStore>) -> Self {
        self.state = Some(store);
        self
    }

    #[must_use]
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Set the identifier generator used when reports are persisted.
    #[must_use]
    pub fn ids(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = Some(ids);
        self
    }

    /// Number reports `first`, `first + 1`, ...
    #[must_use]
    pub fn sequential_ids(self, first: u64) -> Self {
        self.ids(Arc::new(SequenceIdGenerator::starting_at(first)))
    }

    /// Store reports under `key` instead of `communityReports`.
    #[must_use]
    pub fn key(mut self, key: StateKey) -> Self {
        self.key = key;
        self
    }

    #[must_use]
    pub fn bounds(mut self, bounds: MapBounds) -> Self {
        self.bounds = bounds;
        self
    }

    #[must_use]
    pub fn max_file_bytes(mut self, bytes: u64) -> Self {
        self.policy = AttachmentPolicy::new(bytes);
        self
    }

    #[must_use]
    pub fn dismiss_after(mut self, delay: Duration) -> Self {
        self.dismiss_after = delay;
        self
    }

    pub fn build(self) -> Result<ReportForm, FormError> {
        let state = self
            .state
            .ok_or_else(|| FormError::Configuration("a state store is required".into()))?;
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        let ids = self
            .ids
            .unwrap_or_else(|| Arc::new(MillisIdGenerator::new(Arc::clone(&clock))));

        let store = ReportStore::new(state, self.key, ids, Arc::clone(&clock));
        Ok(ReportForm::new(
            store,
            FeedbackController::new(self.dismiss_after),
            clock,
            self.bounds,
            self.policy,
        ))
    }
}

impl Default for ReportFormBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use vigia_state_memory::MemoryStateStore;

    use super::*;

    #[test]
    fn state_is_required() {
        let err = ReportFormBuilder::new().build().err().unwrap();
        assert!(matches!(err, FormError::Configuration(_)));
    }

    #[test]
    fn defaults_apply() {
        let form = ReportFormBuilder::new()
            .state(Arc::new(MemoryStateStore::new()))
            .build()
            .unwrap();
        assert_eq!(form.store().key(), &StateKey::reports());
        assert_eq!(form.feedback().dismiss_after(), Duration::from_millis(5000));
        assert_eq!(form.fields().date_time.len(), "2026-10-18T14:03".len());
    }
}
