//! Core data types for the marker engine

use crate::algorithms::geodesy::CompassPoint;
use crate::core::constants::KM_PER_MILE;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable marker identifier, unique across a dataset
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarkerId(String);

impl MarkerId {
    pub fn new(id: impl Into<String>) -> Self {
        MarkerId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MarkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MarkerId {
    fn from(id: &str) -> Self {
        MarkerId(id.to_string())
    }
}

impl From<String> for MarkerId {
    fn from(id: String) -> Self {
        MarkerId(id)
    }
}

/// WGS84 position in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lon: f64,
    pub lat: f64,
}

impl Coordinates {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

/// Unit in which great-circle distances are reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnit {
    Kilometers,
    /// Imperial; the default for the shipped datasets
    #[default]
    Miles,
}

impl DistanceUnit {
    /// Convert a distance in kilometers into this unit
    pub fn from_km(&self, km: f64) -> f64 {
        match self {
            DistanceUnit::Kilometers => km,
            DistanceUnit::Miles => km / KM_PER_MILE,
        }
    }
}

/// Photo metadata attached to a marker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    pub filename: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit: Option<String>,
}

/// UI-facing metadata the engine carries but never inspects
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarkerAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub photos: Vec<Photo>,
    /// Any remaining dataset properties, kept verbatim
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Fields computed from the current reference location
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedFields {
    /// Great-circle distance in the configured unit
    pub distance: f64,
    /// Initial bearing from the reference location, in [0, 360)
    pub bearing_degrees: f64,
    pub compass: CompassPoint,
}

/// A single point of interest
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub id: MarkerId,
    pub title: String,
    pub category: String,
    pub coordinates: Coordinates,
    pub attributes: MarkerAttributes,
    /// Undefined until a location fix exists
    pub derived: Option<DerivedFields>,
}

impl Marker {
    pub fn new(
        id: impl Into<MarkerId>,
        title: impl Into<String>,
        category: impl Into<String>,
        coordinates: Coordinates,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            category: category.into(),
            coordinates,
            attributes: MarkerAttributes::default(),
            derived: None,
        }
    }

    pub fn with_attributes(mut self, attributes: MarkerAttributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn distance(&self) -> Option<f64> {
        self.derived.map(|d| d.distance)
    }

    pub fn bearing_degrees(&self) -> Option<f64> {
        self.derived.map(|d| d.bearing_degrees)
    }

    pub fn compass(&self) -> Option<CompassPoint> {
        self.derived.map(|d| d.compass)
    }
}

/// Why no location fix is available
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnavailableReason {
    PermissionDenied,
    TimedOut,
    /// Explicitly cleared by the caller
    Cleared,
}

/// Three-valued device location
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum LocationState {
    /// Not yet resolved
    #[default]
    Unknown,
    Unavailable(UnavailableReason),
    Known(Coordinates),
}

impl LocationState {
    pub fn coordinates(&self) -> Option<Coordinates> {
        match self {
            LocationState::Known(coords) => Some(*coords),
            _ => None,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, LocationState::Known(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_unit_conversion() {
        assert_eq!(DistanceUnit::Kilometers.from_km(10.0), 10.0);
        assert!((DistanceUnit::Miles.from_km(KM_PER_MILE) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_location_state_distinguishes_all_three() {
        let unknown = LocationState::default();
        let denied = LocationState::Unavailable(UnavailableReason::PermissionDenied);
        let known = LocationState::Known(Coordinates::new(-119.77, 39.53));

        assert_eq!(unknown, LocationState::Unknown);
        assert!(unknown.coordinates().is_none());
        assert!(denied.coordinates().is_none());
        assert_ne!(unknown, denied);
        assert!(known.is_known());
        assert_eq!(known.coordinates(), Some(Coordinates::new(-119.77, 39.53)));
    }

    #[test]
    fn test_marker_without_fix_has_no_derived_fields() {
        let marker = Marker::new("m1", "Fort Churchill", "Lyon", Coordinates::new(-119.27, 39.29));
        assert!(marker.distance().is_none());
        assert!(marker.compass().is_none());
    }
}
