use serde::{Deserialize, Serialize};

use crate::attachment::AttachmentMeta;
use crate::error::ValidationError;

/// Current values of the report form, exactly as the host holds them.
///
/// An empty string means the field is absent. Values are not trimmed: a field
/// containing only whitespace counts as filled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportFields {
    pub event_type: String,
    pub date_time: String,
    pub latitude: String,
    pub longitude: String,
    pub description: String,
}

impl ReportFields {
    /// Check that every required field is present.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let required = [
            ("event-type", &self.event_type),
            ("event-date", &self.date_time),
            ("latitude", &self.latitude),
            ("longitude", &self.longitude),
            ("description", &self.description),
        ];
        let fields: Vec<&'static str> = required
            .iter()
            .filter(|(_, value)| value.is_empty())
            .map(|(name, _)| *name)
            .collect();

        if fields.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::MissingRequiredFields { fields })
        }
    }
}

/// A validated report that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportDraft {
    pub event_type: String,
    pub date_time: String,
    pub latitude: String,
    pub longitude: String,
    pub description: String,
    pub files: Vec<AttachmentMeta>,
}

/// Build a draft from the form values and the accepted attachments.
pub fn assemble(
    fields: &ReportFields,
    files: Vec<AttachmentMeta>,
) -> Result<ReportDraft, ValidationError> {
    fields.validate()?;
    Ok(ReportDraft {
        event_type: fields.event_type.clone(),
        date_time: fields.date_time.clone(),
        latitude: fields.latitude.clone(),
        longitude: fields.longitude.clone(),
        description: fields.description.clone(),
        files,
    })
}

/// A persisted community report.
///
/// Serializes to the stored record shape:
/// `{eventType, dateTime, latitude, longitude, description, files, id, timestamp}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub event_type: String,
    pub date_time: String,
    pub latitude: String,
    pub longitude: String,
    pub description: String,
    #[serde(default)]
    pub files: Vec<AttachmentMeta>,
    pub id: u64,
    /// RFC 3339 instant of submission.
    pub timestamp: String,
}

impl Report {
    /// Stamp a draft with its identifier and submission instant.
    #[must_use]
    pub fn from_draft(draft: ReportDraft, id: u64, timestamp: String) -> Self {
        Self {
            event_type: draft.event_type,
            date_time: draft.date_time,
            latitude: draft.latitude,
            longitude: draft.longitude,
            description: draft.description,
            files: draft.files,
            id,
            timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ReportFields {
        ReportFields {
            event_type: "flood".into(),
            date_time: "2026-10-18T09:30".into(),
            latitude: "4.5800".into(),
            longitude: "-74.2100".into(),
            description: "Water over the road".into(),
        }
    }

    #[test]
    fn complete_fields_assemble() {
        let files = vec![AttachmentMeta {
            name: "a.jpg".into(),
            size: 10,
            media_type: "image/jpeg".into(),
        }];
        let draft = assemble(&filled(), files.clone()).unwrap();
        assert_eq!(draft.event_type, "flood");
        assert_eq!(draft.files, files);
    }

    #[test]
    fn empty_description_fails() {
        let fields = ReportFields {
            description: String::new(),
            ..filled()
        };
        let err = assemble(&fields, Vec::new()).unwrap_err();
        assert_eq!(err.missing(), ["description"]);
    }

    #[test]
    fn every_missing_field_is_listed() {
        let err = ReportFields::default().validate().unwrap_err();
        assert_eq!(
            err.missing(),
            ["event-type", "event-date", "latitude", "longitude", "description"]
        );
    }

    #[test]
    fn whitespace_counts_as_present() {
        let fields = ReportFields {
            description: " ".into(),
            ..filled()
        };
        assert!(fields.validate().is_ok());
    }

    #[test]
    fn report_serializes_to_stored_shape() {
        let draft = assemble(&filled(), Vec::new()).unwrap();
        let report = Report::from_draft(draft, 1_760_000_000_000, "2026-10-18T14:30:00.000Z".into());
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["eventType"], "flood");
        assert_eq!(json["dateTime"], "2026-10-18T09:30");
        assert_eq!(json["id"], 1_760_000_000_000_u64);
        assert_eq!(json["timestamp"], "2026-10-18T14:30:00.000Z");
        assert!(json["files"].as_array().unwrap().is_empty());
    }

    #[test]
    fn stored_record_without_files_still_loads() {
        let json = r#"{"eventType":"fire","dateTime":"2026-01-01T00:00","latitude":"4.5","longitude":"-74.2","description":"smoke","id":7,"timestamp":"2026-01-01T00:00:00.000Z"}"#;
        let report: Report = serde_json::from_str(json).unwrap();
        assert_eq!(report.id, 7);
        assert!(report.files.is_empty());
    }
}
