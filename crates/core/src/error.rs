use thiserror::Error;

/// Errors from mapping a click on the map surface to coordinates.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MapError {
    /// The surface has no usable area, so no position on it can be interpolated.
    #[error("map surface has no area ({width}x{height})")]
    DegenerateSurface { width: f64, height: f64 },

    /// The click landed outside `[0, width] x [0, height]`.
    #[error("click at ({x}, {y}) is outside the map surface")]
    OutsideSurface { x: f64, y: f64 },
}

/// Message shown to the reporter when required fields are missing.
pub const MISSING_FIELDS_MESSAGE: &str = "Please complete all required fields.";

/// A report could not be assembled from the current form values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// One or more required fields were empty.
    ///
    /// `fields` lists the offending form field names for diagnostics; the
    /// user-facing message is the same whichever fields are missing.
    #[error("Please complete all required fields.")]
    MissingRequiredFields { fields: Vec<&'static str> },
}

impl ValidationError {
    /// Names of the empty required fields.
    pub fn missing(&self) -> &[&'static str] {
        match self {
            Self::MissingRequiredFields { fields } => fields,
        }
    }
}

/// A candidate attachment larger than the configured limit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("The file {name} is too large. Maximum {}MB.", .limit / (1024 * 1024))]
pub struct OversizedFile {
    pub name: String,
    pub size: u64,
    pub limit: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_message_is_generic() {
        let one = ValidationError::MissingRequiredFields {
            fields: vec!["description"],
        };
        let all = ValidationError::MissingRequiredFields {
            fields: vec!["event-type", "event-date", "description"],
        };
        assert_eq!(one.to_string(), all.to_string());
        assert_eq!(one.to_string(), MISSING_FIELDS_MESSAGE);
        assert_eq!(all.missing().len(), 3);
    }

    #[test]
    fn oversized_file_names_the_file() {
        let err = OversizedFile {
            name: "flood.mp4".into(),
            size: 11 * 1024 * 1024,
            limit: 10 * 1024 * 1024,
        };
        assert_eq!(
            err.to_string(),
            "The file flood.mp4 is too large. Maximum 10MB."
        );
    }
}
