pub mod attachment;
pub mod clock;
pub mod coords;
pub mod error;
pub mod export;
pub mod id;
pub mod report;

pub use attachment::{
    AttachmentMeta, AttachmentPolicy, Collected, DEFAULT_MAX_FILE_BYTES, FileCandidate,
    PreviewEntry,
};
pub use clock::{Clock, FixedClock, SystemClock, default_date_time, format_timestamp};
pub use coords::{Coordinates, MapBounds, MapClick, Surface, get_coords};
pub use error::{MISSING_FIELDS_MESSAGE, MapError, OversizedFile, ValidationError};
pub use export::to_feature_collection;
pub use id::{IdGenerator, MillisIdGenerator, SequenceIdGenerator};
pub use report::{Report, ReportDraft, ReportFields, assemble};
