use std::sync::Arc;

use tracing::{debug, error, warn};

use vigia_core::{
    AttachmentPolicy, Clock, Coordinates, FileCandidate, MapBounds, MapClick, MapError,
    OversizedFile, PreviewEntry, Report, ReportFields, Surface, assemble, default_date_time,
};

use crate::error::FormError;
use crate::feedback::FeedbackController;
use crate::store::ReportStore;

/// The report form and its transient state.
///
/// Each public `on_*`/`submit` method corresponds to one host event. The
/// host renders [`fields`](Self::fields), [`preview`](Self::preview) and the
/// banners from [`feedback`](Self::feedback) after every call.
pub struct ReportForm {
    fields: ReportFields,
    selection: Vec<FileCandidate>,
    preview: Vec<PreviewEntry>,
    bounds: MapBounds,
    policy: AttachmentPolicy,
    store: ReportStore,
    feedback: FeedbackController,
    clock: Arc<dyn Clock>,
}

impl ReportForm {
    /// Create the form and write the default date into the date field.
    pub(crate) fn new(
        store: ReportStore,
        feedback: FeedbackController,
        clock: Arc<dyn Clock>,
        bounds: MapBounds,
        policy: AttachmentPolicy,
    ) -> Self {
        let fields = ReportFields {
            date_time: default_date_time(clock.as_ref()),
            ..ReportFields::default()
        };
        Self {
            fields,
            selection: Vec::new(),
            preview: Vec::new(),
            bounds,
            policy,
            store,
            feedback,
            clock,
        }
    }

    pub fn fields(&self) -> &ReportFields {
        &self.fields
    }

    pub fn preview(&self) -> &[PreviewEntry] {
        &self.preview
    }

    pub fn feedback(&self) -> &FeedbackController {
        &self.feedback
    }

    pub fn store(&self) -> &ReportStore {
        &self.store
    }

    pub fn set_event_type(&mut self, value: impl Into<String>) {
        self.fields.event_type = value.into();
    }

    pub fn set_date_time(&mut self, value: impl Into<String>) {
        self.fields.date_time = value.into();
    }

    pub fn set_description(&mut self, value: impl Into<String>) {
        self.fields.description = value.into();
    }

    pub fn set_latitude(&mut self, value: impl Into<String>) {
        self.fields.latitude = value.into();
    }

    pub fn set_longitude(&mut self, value: impl Into<String>) {
        self.fields.longitude = value.into();
    }

    /// Map click: overwrite the coordinate fields with the clicked position.
    ///
    /// A rejected click leaves the fields as they were.
    pub fn on_map_click(
        &mut self,
        surface: &Surface,
        click: MapClick,
    ) -> Result<Coordinates, MapError> {
        let coords = self.bounds.locate(surface, click).inspect_err(|e| {
            debug!(error = %e, "map click ignored");
        })?;
        debug!(
            x = click.x,
            y = click.y,
            latitude = %coords.latitude,
            longitude = %coords.longitude,
            "map click located"
        );
        self.fields.latitude.clone_from(&coords.latitude);
        self.fields.longitude.clone_from(&coords.longitude);
        Ok(coords)
    }

    /// File selection: replace the previous selection and rebuild the preview.
    ///
    /// Returns one warning per file over the size limit; those files are
    /// neither previewed nor attached on submit.
    pub fn on_files_selected(&mut self, files: Vec<FileCandidate>) -> Vec<OversizedFile> {
        let collected = self.policy.collect(&files);
        self.selection = files;
        self.preview = collected.preview;
        collected.rejected
    }

    /// Submit: validate, persist, show the outcome and reset on success.
    ///
    /// On failure the error banner is shown and the form is left untouched.
    pub async fn submit(&mut self) -> Result<Report, FormError> {
        // The size gate is re-applied here so oversized files never persist.
        let files = self.policy.accepted(&self.selection);

        let draft = match assemble(&self.fields, files) {
            Ok(draft) => draft,
            Err(e) => {
                warn!(missing = ?e.missing(), "report rejected");
                let err = FormError::from(e);
                self.feedback.show_error(err.user_message());
                return Err(err);
            }
        };

        match self.store.append(draft).await {
            Ok(report) => {
                self.feedback.show_success();
                self.reset();
                Ok(report)
            }
            Err(e) => {
                error!(error = %e, key = %self.store.key(), "failed to persist report");
                let err = FormError::from(e);
                self.feedback.show_error(err.user_message());
                Err(err)
            }
        }
    }

    /// Clear every field, the selection and the preview, then re-apply the
    /// default date.
    pub fn reset(&mut self) {
        self.fields = ReportFields {
            date_time: default_date_time(self.clock.as_ref()),
            ..ReportFields::default()
        };
        self.selection.clear();
        self.preview.clear();
    }
}
