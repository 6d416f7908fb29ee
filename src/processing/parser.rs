//! GeoJSON dataset parser
//!
//! Datasets ship as a `FeatureCollection` of `Point` features:
//!
//! ```json
//! {"type": "FeatureCollection", "features": [
//!   {"type": "Feature",
//!    "geometry": {"type": "Point", "coordinates": [-119.27, 39.29]},
//!    "properties": {"marker_id": "NV-132", "title": "Fort Churchill",
//!                   "county": "Lyon", "city": "---", "photos": []}}
//! ]}
//! ```
//!
//! `marker_id`, `title` and `county` are required. `city`, `description`
//! (or `inscription`) and `photos` map onto [`MarkerAttributes`]; every other
//! property is carried through untouched in `extra`.

use crate::core::{Coordinates, Marker, MarkerAttributes, MarkerId, Photo};
use crate::validation::error::{EngineError, EngineResult};
use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    #[serde(rename = "type")]
    kind: String,
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    geometry: Geometry,
    #[serde(default)]
    properties: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    #[serde(rename = "type")]
    kind: String,
    coordinates: Vec<f64>,
}

/// Parse a GeoJSON `FeatureCollection` document into markers
pub fn parse_feature_collection(json: &str) -> EngineResult<Vec<Marker>> {
    let collection: FeatureCollection =
        serde_json::from_str(json).map_err(|e| EngineError::Dataset(format!("invalid GeoJSON: {}", e)))?;

    if collection.kind != "FeatureCollection" {
        return Err(EngineError::Dataset(format!(
            "expected a FeatureCollection, found {}",
            collection.kind
        )));
    }

    collection
        .features
        .into_iter()
        .enumerate()
        .map(|(position, feature)| parse_feature(position, feature))
        .collect()
}

fn parse_feature(position: usize, feature: Feature) -> EngineResult<Marker> {
    let mut properties = feature.properties;

    let id = match properties.remove("marker_id") {
        Some(Value::String(id)) => MarkerId::new(id),
        Some(Value::Number(id)) => MarkerId::new(id.to_string()),
        _ => {
            return Err(EngineError::Dataset(format!(
                "feature {} has no marker_id",
                position
            )))
        }
    };

    if feature.geometry.kind != "Point" || feature.geometry.coordinates.len() < 2 {
        return Err(EngineError::Dataset(format!(
            "marker {} must have Point geometry with [lon, lat]",
            id
        )));
    }
    let coordinates = Coordinates::new(feature.geometry.coordinates[0], feature.geometry.coordinates[1]);

    let title = take_string(&mut properties, "title")
        .ok_or_else(|| EngineError::Dataset(format!("marker {} has no title", id)))?;
    let category = take_string(&mut properties, "county")
        .ok_or_else(|| EngineError::Dataset(format!("marker {} has no county", id)))?;

    let photos = match properties.remove("photos") {
        Some(value) => serde_json::from_value::<Vec<Photo>>(value)
            .map_err(|e| EngineError::Dataset(format!("marker {} has malformed photos: {}", id, e)))?,
        None => Vec::new(),
    };

    let attributes = MarkerAttributes {
        city: take_string(&mut properties, "city"),
        description: take_string(&mut properties, "description")
            .or_else(|| take_string(&mut properties, "inscription")),
        photos,
        extra: properties,
    };

    Ok(Marker::new(id, title, category, coordinates).with_attributes(attributes))
}

fn take_string(properties: &mut Map<String, Value>, key: &str) -> Option<String> {
    match properties.remove(key) {
        Some(Value::String(value)) => Some(value),
        Some(other) => {
            // Non-string values stay available to the UI untouched
            properties.insert(key.to_string(), other);
            None
        }
        None => None,
    }
}
