use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::OversizedFile;

/// Largest attachment accepted by default: 10 MiB.
pub const DEFAULT_MAX_FILE_BYTES: u64 = 10 * 1024 * 1024;

/// Metadata of an attachment recorded on a report.
///
/// Only the descriptor is kept; file content is never read or stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentMeta {
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// Media type reported by the host, e.g. `"image/jpeg"`. May be empty.
    #[serde(rename = "type")]
    pub media_type: String,
}

/// A file offered by the host's file picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCandidate {
    pub name: String,
    pub size: u64,
    pub media_type: String,
}

impl FileCandidate {
    pub fn new(name: impl Into<String>, size: u64, media_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size,
            media_type: media_type.into(),
        }
    }
}

impl From<&FileCandidate> for AttachmentMeta {
    fn from(file: &FileCandidate) -> Self {
        Self {
            name: file.name.clone(),
            size: file.size,
            media_type: file.media_type.clone(),
        }
    }
}

/// One line of the attachment preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewEntry {
    pub name: String,
    /// Size in mebibytes with two decimals, e.g. `"4.77"`.
    pub size_mb: String,
}

impl PreviewEntry {
    #[allow(clippy::cast_precision_loss)]
    fn for_file(file: &FileCandidate) -> Self {
        Self {
            name: file.name.clone(),
            size_mb: format!("{:.2}", file.size as f64 / 1024.0 / 1024.0),
        }
    }
}

impl fmt::Display for PreviewEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} MB)", self.name, self.size_mb)
    }
}

/// Outcome of running one file selection through the size gate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collected {
    /// Accepted files, in selection order.
    pub accepted: Vec<AttachmentMeta>,
    /// One preview entry per accepted file.
    pub preview: Vec<PreviewEntry>,
    /// One warning per rejected file, in selection order.
    pub rejected: Vec<OversizedFile>,
}

/// Size gate applied to every file selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttachmentPolicy {
    max_file_bytes: u64,
}

impl AttachmentPolicy {
    #[must_use]
    pub fn new(max_file_bytes: u64) -> Self {
        Self { max_file_bytes }
    }

    #[must_use]
    pub fn max_file_bytes(&self) -> u64 {
        self.max_file_bytes
    }

    /// Admit a single file, or explain why it is too large.
    pub fn check(&self, file: &FileCandidate) -> Result<AttachmentMeta, OversizedFile> {
        if file.size > self.max_file_bytes {
            return Err(OversizedFile {
                name: file.name.clone(),
                size: file.size,
                limit: self.max_file_bytes,
            });
        }
        Ok(AttachmentMeta::from(file))
    }

    /// Run a whole selection through the gate, building the preview as it goes.
    pub fn collect(&self, files: &[FileCandidate]) -> Collected {
        let mut collected = Collected::default();
        for file in files {
            match self.check(file) {
                Ok(meta) => {
                    collected.preview.push(PreviewEntry::for_file(file));
                    collected.accepted.push(meta);
                }
                Err(oversized) => {
                    warn!(
                        file = %oversized.name,
                        size = oversized.size,
                        limit = oversized.limit,
                        "attachment rejected"
                    );
                    collected.rejected.push(oversized);
                }
            }
        }
        collected
    }

    /// Accepted metadata only, for re-reading a selection at submit time.
    pub fn accepted(&self, files: &[FileCandidate]) -> Vec<AttachmentMeta> {
        files.iter().filter_map(|f| self.check(f).ok()).collect()
    }
}

impl Default for AttachmentPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FILE_BYTES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MB: u64 = 1024 * 1024;

    #[test]
    fn oversized_files_are_skipped_in_order() {
        let files = vec![
            FileCandidate::new("a.jpg", 5 * MB, "image/jpeg"),
            FileCandidate::new("b.mp4", 11 * MB, "video/mp4"),
            FileCandidate::new("c.png", 3 * MB, "image/png"),
        ];
        let collected = AttachmentPolicy::default().collect(&files);

        let names: Vec<_> = collected.accepted.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["a.jpg", "c.png"]);
        assert_eq!(collected.preview.len(), 2);
        assert_eq!(collected.rejected.len(), 1);
        assert_eq!(collected.rejected[0].name, "b.mp4");
    }

    #[test]
    fn exactly_the_limit_is_accepted() {
        let policy = AttachmentPolicy::default();
        let at_limit = FileCandidate::new("edge.bin", DEFAULT_MAX_FILE_BYTES, "");
        let over = FileCandidate::new("over.bin", DEFAULT_MAX_FILE_BYTES + 1, "");
        assert!(policy.check(&at_limit).is_ok());
        assert!(policy.check(&over).is_err());
    }

    #[test]
    fn preview_shows_mebibytes_with_two_decimals() {
        let files = vec![FileCandidate::new("photo.jpg", 5_000_000, "image/jpeg")];
        let collected = AttachmentPolicy::default().collect(&files);
        assert_eq!(collected.preview[0].size_mb, "4.77");
        assert_eq!(collected.preview[0].to_string(), "photo.jpg (4.77 MB)");
    }

    #[test]
    fn accepted_matches_collect() {
        let files = vec![
            FileCandidate::new("big.mov", 20 * MB, "video/quicktime"),
            FileCandidate::new("small.txt", 12, "text/plain"),
        ];
        let policy = AttachmentPolicy::new(MB);
        assert_eq!(policy.accepted(&files), policy.collect(&files).accepted);
    }

    #[test]
    fn metadata_serializes_media_type_as_type() {
        let meta = AttachmentMeta {
            name: "a.jpg".into(),
            size: 42,
            media_type: "image/jpeg".into(),
        };
        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "a.jpg", "size": 42, "type": "image/jpeg"})
        );
    }
}
