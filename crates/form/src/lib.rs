//! Report submission pipeline.
//!
//! [`ReportForm`] adapts the host's three events (map click, file selection,
//! submit) onto the pure stages in `vigia-core`, persists through
//! [`ReportStore`] and reports the outcome through [`FeedbackController`].

pub mod builder;
pub mod error;
pub mod feedback;
pub mod form;
pub mod store;

pub use builder::ReportFormBuilder;
pub use error::{FormError, PERSISTENCE_FAILURE_MESSAGE, StoreError};
pub use feedback::{Banner, Banners, DEFAULT_DISMISS_AFTER, FeedbackController};
pub use form::ReportForm;
pub use store::ReportStore;
