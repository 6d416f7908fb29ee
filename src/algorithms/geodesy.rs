//! Great-circle distance and bearing between WGS84 positions
//!
//! Distances use the haversine formula on a sphere of radius
//! [`EARTH_RADIUS_KM`]; bearings are initial (forward azimuth) bearings
//! normalized into `[0, 360)` and bucketed into 16 compass sectors.

use crate::core::constants::{COMPASS_SECTOR_DEG, EARTH_RADIUS_KM};
use crate::core::{Coordinates, DistanceUnit};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 16-point compass rose, clockwise from north
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompassPoint {
    N,
    NNE,
    NE,
    ENE,
    E,
    ESE,
    SE,
    SSE,
    S,
    SSW,
    SW,
    WSW,
    W,
    WNW,
    NW,
    NNW,
}

impl CompassPoint {
    pub const ALL: [CompassPoint; 16] = [
        CompassPoint::N,
        CompassPoint::NNE,
        CompassPoint::NE,
        CompassPoint::ENE,
        CompassPoint::E,
        CompassPoint::ESE,
        CompassPoint::SE,
        CompassPoint::SSE,
        CompassPoint::S,
        CompassPoint::SSW,
        CompassPoint::SW,
        CompassPoint::WSW,
        CompassPoint::W,
        CompassPoint::WNW,
        CompassPoint::NW,
        CompassPoint::NNW,
    ];

    /// Sector for a bearing in degrees; boundaries round up to the next sector
    pub fn from_bearing(bearing_deg: f64) -> Self {
        let sector = (bearing_deg / COMPASS_SECTOR_DEG + 0.5).floor() as i64;
        Self::ALL[sector.rem_euclid(16) as usize]
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn label(&self) -> &'static str {
        match self {
            CompassPoint::N => "N",
            CompassPoint::NNE => "NNE",
            CompassPoint::NE => "NE",
            CompassPoint::ENE => "ENE",
            CompassPoint::E => "E",
            CompassPoint::ESE => "ESE",
            CompassPoint::SE => "SE",
            CompassPoint::SSE => "SSE",
            CompassPoint::S => "S",
            CompassPoint::SSW => "SSW",
            CompassPoint::SW => "SW",
            CompassPoint::WSW => "WSW",
            CompassPoint::W => "W",
            CompassPoint::WNW => "WNW",
            CompassPoint::NW => "NW",
            CompassPoint::NNW => "NNW",
        }
    }

    /// Spelled-out direction, e.g. for narration
    pub fn verbose(&self) -> &'static str {
        match self {
            CompassPoint::N => "north",
            CompassPoint::NNE => "north-northeast",
            CompassPoint::NE => "northeast",
            CompassPoint::ENE => "east-northeast",
            CompassPoint::E => "east",
            CompassPoint::ESE => "east-southeast",
            CompassPoint::SE => "southeast",
            CompassPoint::SSE => "south-southeast",
            CompassPoint::S => "south",
            CompassPoint::SSW => "south-southwest",
            CompassPoint::SW => "southwest",
            CompassPoint::WSW => "west-southwest",
            CompassPoint::W => "west",
            CompassPoint::WNW => "west-northwest",
            CompassPoint::NW => "northwest",
            CompassPoint::NNW => "north-northwest",
        }
    }
}

impl fmt::Display for CompassPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Distance and direction from one position to another
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeodesicVector {
    pub distance: f64,
    pub bearing_degrees: f64,
    pub compass: CompassPoint,
}

/// Haversine great-circle distance in kilometers
pub fn haversine_km(from: Coordinates, to: Coordinates) -> f64 {
    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();
    let d_lat = (to.lat - from.lat).to_radians();
    let d_lon = (to.lon - from.lon).to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Initial bearing from `from` towards `to`, in `[0, 360)`
pub fn initial_bearing(from: Coordinates, to: Coordinates) -> f64 {
    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();
    let d_lon = (to.lon - from.lon).to_radians();

    let y = d_lon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lon.cos();

    let bearing = (y.atan2(x).to_degrees() + 360.0) % 360.0;
    // -0.0 and values a hair under 360 can round onto the upper bound
    if bearing >= 360.0 {
        bearing - 360.0
    } else {
        bearing
    }
}

/// Distance (in `unit`) and bearing from `from` to `to`
pub fn distance_and_bearing(from: Coordinates, to: Coordinates, unit: DistanceUnit) -> GeodesicVector {
    let bearing_degrees = initial_bearing(from, to);
    GeodesicVector {
        distance: unit.from_km(haversine_km(from, to)),
        bearing_degrees,
        compass: CompassPoint::from_bearing(bearing_degrees),
    }
}
