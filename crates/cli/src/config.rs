use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use vigia_core::{DEFAULT_MAX_FILE_BYTES, MapBounds};
use vigia_form::DEFAULT_DISMISS_AFTER;
use vigia_state::REPORTS_KEY;

/// Top-level configuration, loaded from a TOML file.
#[derive(Debug, Default, Deserialize)]
pub struct VigiaConfig {
    /// Where reports are persisted.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Geographic box covered by the map.
    #[serde(default)]
    pub map: MapConfig,
    /// Attachment size limit.
    #[serde(default)]
    pub attachments: AttachmentsConfig,
    /// Banner timing.
    #[serde(default)]
    pub feedback: FeedbackConfig,
    /// Report identifier assignment.
    #[serde(default)]
    pub ids: IdsConfig,
}

impl VigiaConfig {
    /// Load `path`, or fall back to defaults if the file does not exist.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }
}

/// Persistence backend configuration.
#[derive(Debug, Deserialize)]
pub struct StorageConfig {
    /// Which backend to use: `"file"` or `"memory"`.
    #[serde(default = "default_backend")]
    pub backend: String,
    /// JSON document used by the file backend.
    #[serde(default = "default_path")]
    pub path: String,
    /// Key the report list is stored under.
    #[serde(default = "default_key")]
    pub key: String,
    /// Optional key prefix.
    pub prefix: Option<String>,
    /// Byte quota for the memory backend.
    pub quota_bytes: Option<usize>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            path: default_path(),
            key: default_key(),
            prefix: None,
            quota_bytes: None,
        }
    }
}

fn default_backend() -> String {
    "file".to_owned()
}

fn default_path() -> String {
    "vigia-data.json".to_owned()
}

fn default_key() -> String {
    REPORTS_KEY.to_owned()
}

/// Map box. Defaults to the Soacha approximation.
#[derive(Debug, Deserialize)]
pub struct MapConfig {
    #[serde(default = "default_north")]
    pub north: f64,
    #[serde(default = "default_west")]
    pub west: f64,
    #[serde(default = "default_lat_span")]
    pub lat_span: f64,
    #[serde(default = "default_long_span")]
    pub long_span: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            north: default_north(),
            west: default_west(),
            lat_span: default_lat_span(),
            long_span: default_long_span(),
        }
    }
}

impl MapConfig {
    pub fn bounds(&self) -> MapBounds {
        MapBounds {
            north: self.north,
            west: self.west,
            lat_span: self.lat_span,
            long_span: self.long_span,
        }
    }
}

fn default_north() -> f64 {
    MapBounds::SOACHA.north
}

fn default_west() -> f64 {
    MapBounds::SOACHA.west
}

fn default_lat_span() -> f64 {
    MapBounds::SOACHA.lat_span
}

fn default_long_span() -> f64 {
    MapBounds::SOACHA.long_span
}

#[derive(Debug, Deserialize)]
pub struct AttachmentsConfig {
    /// Largest accepted attachment in bytes (default: 10 MiB).
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: u64,
}

impl Default for AttachmentsConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: default_max_file_bytes(),
        }
    }
}

fn default_max_file_bytes() -> u64 {
    DEFAULT_MAX_FILE_BYTES
}

#[derive(Debug, Deserialize)]
pub struct FeedbackConfig {
    /// Banner auto-hide delay in milliseconds (default: 5000).
    #[serde(default = "default_dismiss_after_ms")]
    pub dismiss_after_ms: u64,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            dismiss_after_ms: default_dismiss_after_ms(),
        }
    }
}

impl FeedbackConfig {
    pub fn dismiss_after(&self) -> Duration {
        Duration::from_millis(self.dismiss_after_ms)
    }
}

#[allow(clippy::cast_possible_truncation)]
fn default_dismiss_after_ms() -> u64 {
    DEFAULT_DISMISS_AFTER.as_millis() as u64
}

/// How report identifiers are assigned.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    /// Epoch milliseconds, bumped to stay unique.
    #[default]
    Millis,
    /// 1, 2, 3, ... continuing after the largest stored id.
    Sequence,
}

#[derive(Debug, Default, Deserialize)]
pub struct IdsConfig {
    #[serde(default)]
    pub strategy: IdStrategy,
}
