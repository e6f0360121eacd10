use thiserror::Error;

use vigia_core::ValidationError;

/// Message shown when a validated report could not be written.
pub const PERSISTENCE_FAILURE_MESSAGE: &str = "Your report could not be saved. Please try again.";

/// Errors from the report store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The persistence layer rejected the read or write.
    #[error("state error: {0}")]
    State(#[from] vigia_state::StateError),

    /// The stored value is not a JSON array of reports.
    #[error("stored reports are corrupt: {0}")]
    Corrupt(#[source] serde_json::Error),

    /// The report list could not be encoded.
    #[error("failed to encode reports: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Errors surfaced by the report form.
#[derive(Debug, Error)]
pub enum FormError {
    /// A required field was empty at submit time.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The report was valid but could not be persisted.
    #[error("persistence failed: {0}")]
    Persistence(#[from] StoreError),

    /// The form was built without a required collaborator.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl FormError {
    /// Text for the error banner.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(e) => e.to_string(),
            Self::Persistence(_) | Self::Configuration(_) => PERSISTENCE_FAILURE_MESSAGE.to_owned(),
        }
    }
}
