//! AR projection of nearby markers into a device-centred scene frame
//!
//! The scene frame is planar: `x` grows east, `z` grows south (towards the
//! viewer when facing north), both in meters from the device. Rotation about
//! the vertical axis comes from the AR platform's gravity+compass world
//! alignment and is not applied here.

use crate::algorithms::projection::{to_utm_in_zone, UtmCoordinate, UtmZone};
use crate::core::constants::{AR_MIN_MARKERS, AR_PROXIMITY_THRESHOLD_M, AR_SCALE_DIVISOR};
use crate::core::{Coordinates, Marker, MarkerId};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// AR selection and placement parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArConfig {
    /// Markers within this planar distance (meters) are always shown
    pub proximity_threshold_m: f64,
    /// Below this many in range, show the nearest N instead
    pub min_markers: usize,
    /// `scale = |round(z / scale_divisor)|`
    pub scale_divisor: f64,
    /// Platforms without true-north fusion must supply a heading first
    pub require_heading: bool,
}

impl Default for ArConfig {
    fn default() -> Self {
        Self {
            proximity_threshold_m: AR_PROXIMITY_THRESHOLD_M,
            min_markers: AR_MIN_MARKERS,
            scale_divisor: AR_SCALE_DIVISOR,
            require_heading: true,
        }
    }
}

/// One marker placed in the scene
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArPlacement {
    pub marker_id: MarkerId,
    /// Meters east of the device
    pub x: f64,
    /// Meters south of the device (negative is ahead when facing north)
    pub z: f64,
    pub scale: f64,
    /// Planar distance from the device (meters)
    pub distance_m: f64,
}

/// Markers to render for one location/heading update
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArFrame {
    pub heading_degrees: Option<f64>,
    pub placements: Vec<ArPlacement>,
}

impl ArFrame {
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}

/// Tracks the latest device fix and heading and rebuilds frames on demand
///
/// The projector reads marker coordinates only; AR distances live in the
/// frame and never touch a marker's great-circle derived fields.
#[derive(Debug, Clone, Default)]
pub struct ArProjector {
    config: ArConfig,
    device: Option<Coordinates>,
    heading: Option<f64>,
}

impl ArProjector {
    pub fn new(config: ArConfig) -> Self {
        Self {
            config,
            device: None,
            heading: None,
        }
    }

    pub fn config(&self) -> &ArConfig {
        &self.config
    }

    pub fn device(&self) -> Option<Coordinates> {
        self.device
    }

    pub fn heading(&self) -> Option<f64> {
        self.heading
    }

    /// Record a location fix (and optionally a heading) and rebuild the frame
    pub fn update(&mut self, device: Coordinates, heading: Option<f64>, markers: &[Marker]) -> ArFrame {
        self.device = Some(device);
        if let Some(h) = heading {
            self.set_heading(h);
        }
        self.frame(markers)
    }

    /// Record a location fix without rebuilding the frame
    pub fn set_device(&mut self, device: Coordinates) {
        self.device = Some(device);
    }

    /// Record a heading reading and rebuild the frame for the last fix
    pub fn update_heading(&mut self, heading: f64, markers: &[Marker]) -> ArFrame {
        self.set_heading(heading);
        self.frame(markers)
    }

    /// Forget the device fix, e.g. when the AR view is torn down
    pub fn reset(&mut self) {
        self.device = None;
        self.heading = None;
    }

    /// Current frame; empty until the required location/heading inputs exist
    pub fn frame(&self, markers: &[Marker]) -> ArFrame {
        let Some(device) = self.device else {
            return ArFrame::default();
        };
        if self.config.require_heading && self.heading.is_none() {
            debug!("AR frame waiting for first heading");
            return ArFrame::default();
        }

        ArFrame {
            heading_degrees: self.heading,
            placements: project_nearby(device, markers, &self.config),
        }
    }

    /// Record a heading reading without rebuilding the frame
    pub fn set_heading(&mut self, heading: f64) {
        if heading.is_finite() {
            self.heading = Some((heading % 360.0 + 360.0) % 360.0);
        } else {
            warn!(heading, "ignoring non-finite heading");
        }
    }
}

/// Select the markers to render around `device` and place them in the scene
///
/// Placements keep the input order. When too few markers are in range the
/// `min_markers` nearest are used instead, ties keeping input order. Markers
/// that all carry great-circle distances from `device` are ranked by those,
/// so a distance-sorted input yields its own prefix; otherwise the planar
/// distance ranks them.
pub fn project_nearby(device: Coordinates, markers: &[Marker], config: &ArConfig) -> Vec<ArPlacement> {
    let zone = UtmZone::for_coordinates(device);
    let device_utm = to_utm_in_zone(device, zone);

    let projected: Vec<(&Marker, UtmCoordinate, f64)> = markers
        .iter()
        .map(|marker| {
            let utm = to_utm_in_zone(marker.coordinates, zone);
            let distance = device_utm.planar_distance(&utm);
            (marker, utm, distance)
        })
        .collect();

    let in_range = projected
        .iter()
        .filter(|(_, _, d)| *d <= config.proximity_threshold_m)
        .count();

    let selected: Vec<&(&Marker, UtmCoordinate, f64)> = if in_range < config.min_markers {
        debug!(in_range, min = config.min_markers, "AR falling back to nearest markers");
        let annotated: Option<Vec<f64>> = markers.iter().map(Marker::distance).collect();
        let rank = |position: usize| match &annotated {
            Some(distances) => distances[position],
            None => projected[position].2,
        };
        let mut nearest: Vec<usize> = (0..projected.len()).collect();
        nearest.sort_by(|&a, &b| rank(a).total_cmp(&rank(b)));
        nearest.truncate(config.min_markers);
        nearest.sort_unstable();
        nearest.into_iter().map(|position| &projected[position]).collect()
    } else {
        projected
            .iter()
            .filter(|(_, _, d)| *d <= config.proximity_threshold_m)
            .collect()
    };

    selected
        .into_iter()
        .map(|(marker, utm, distance)| {
            let (x, z) = scene_offset(&device_utm, utm);
            ArPlacement {
                marker_id: marker.id.clone(),
                x,
                z,
                scale: scale_for(z, config.scale_divisor),
                distance_m: *distance,
            }
        })
        .collect()
}

/// `(east, -north)` offset of `marker` from `device` in scene units
pub fn scene_offset(device: &UtmCoordinate, marker: &UtmCoordinate) -> (f64, f64) {
    let delta = marker.as_vector() - device.as_vector();
    (delta.x, -delta.y)
}

/// Visual scale for a scene z-offset
pub fn scale_for(z: f64, divisor: f64) -> f64 {
    (z / divisor).round().abs()
}
