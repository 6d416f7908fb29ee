//! Human-readable distances and list rows

use crate::core::constants::FEET_PER_MILE;
use crate::core::{DistanceUnit, Marker};
use serde::Serialize;
use std::fmt;

/// Placeholder city used by the dataset for unincorporated locations
const NO_CITY: &str = "---";

const SUBTITLE_SEPARATOR: &str = "   |   ";

/// Format a distance in miles, switching to feet when close
///
/// Under half a mile the value is shown in feet rounded up to the next 10;
/// anything under 100 feet reads "within 100 feet".
pub fn format_distance(miles: f64) -> String {
    if miles < 0.5 {
        let feet = round_up_to_ten((miles * FEET_PER_MILE).round());
        if feet >= 100.0 {
            format!("{:.0} feet", feet)
        } else {
            "within 100 feet".to_string()
        }
    } else {
        format!("{:.1} miles", miles)
    }
}

/// Kilometre counterpart of [`format_distance`]
pub fn format_distance_km(km: f64) -> String {
    if km < 0.5 {
        let meters = round_up_to_ten((km * 1000.0).round());
        if meters >= 30.0 {
            format!("{:.0} meters", meters)
        } else {
            "within 30 meters".to_string()
        }
    } else {
        format!("{:.1} km", km)
    }
}

/// Format `distance` according to the unit it is expressed in
pub fn format_distance_in(distance: f64, unit: DistanceUnit) -> String {
    match unit {
        DistanceUnit::Miles => format_distance(distance),
        DistanceUnit::Kilometers => format_distance_km(distance),
    }
}

fn round_up_to_ten(value: f64) -> f64 {
    (value / 10.0).ceil() * 10.0
}

/// List subtitle: `"[city, ]category[   |   distance bearing]"`
///
/// The distance part appears only when the location is known and the marker
/// carries derived fields.
pub fn marker_subtitle(marker: &Marker, location_known: bool, unit: DistanceUnit) -> String {
    let mut subtitle = marker.category.clone();

    if location_known {
        if let Some(derived) = &marker.derived {
            subtitle.push_str(SUBTITLE_SEPARATOR);
            subtitle.push_str(&format_distance_in(derived.distance, unit));
            subtitle.push(' ');
            subtitle.push_str(derived.compass.label());
        }
    }

    match marker.attributes.city.as_deref() {
        Some(city) if !city.is_empty() && city != NO_CITY => format!("{}, {}", city, subtitle),
        _ => subtitle,
    }
}

/// One row of the marker list as presented to the user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListEntry {
    pub id: String,
    pub title: String,
    pub subtitle: String,
}

impl ListEntry {
    pub fn new(marker: &Marker, location_known: bool, unit: DistanceUnit) -> Self {
        Self {
            id: marker.id.to_string(),
            title: marker.title.clone(),
            subtitle: marker_subtitle(marker, location_known, unit),
        }
    }
}

impl fmt::Display for ListEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]\n    {}", self.title, self.id, self.subtitle)
    }
}
