//! GeoJSON export of persisted reports.

use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value, feature::Id};
use serde_json::json;

use crate::report::Report;

/// Build a `FeatureCollection` with one point per locatable report.
///
/// Points are `[longitude, latitude]`. Reports whose coordinates do not parse
/// as numbers are left out.
pub fn to_feature_collection(reports: &[Report]) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features: reports.iter().filter_map(to_feature).collect(),
        foreign_members: None,
    }
}

fn to_feature(report: &Report) -> Option<Feature> {
    let latitude: f64 = report.latitude.trim().parse().ok()?;
    let longitude: f64 = report.longitude.trim().parse().ok()?;
    if !latitude.is_finite() || !longitude.is_finite() {
        return None;
    }

    let mut properties = JsonObject::new();
    properties.insert("id".into(), json!(report.id));
    properties.insert("eventType".into(), json!(report.event_type));
    properties.insert("dateTime".into(), json!(report.date_time));
    properties.insert("description".into(), json!(report.description));
    properties.insert("timestamp".into(), json!(report.timestamp));
    properties.insert("attachments".into(), json!(report.files.len()));

    Some(Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::Point(vec![longitude, latitude]))),
        id: Some(Id::Number(report.id.into())),
        properties: Some(properties),
        foreign_members: None,
    })
}
