//! Transverse Mercator (UTM) projection for local planar math
//!
//! AR placement needs metric offsets between the device and nearby markers.
//! Both are projected into the device's UTM zone so that offsets stay
//! continuous even when a marker sits across a zone boundary.
//! - WGS84 ellipsoid parameters
//! - Zone and hemisphere selection
//! - Forward projection with an explicit zone override
//! - Planar Euclidean distance via `nalgebra`

use crate::core::Coordinates;
use nalgebra::Vector2;

/// Semi-major axis (meters, WGS84)
pub const EARTH_RADIUS_WGS84: f64 = 6378137.0;

/// Earth flattening factor (WGS84)
pub const EARTH_FLATTENING_WGS84: f64 = 1.0 / 298.257223563;

/// Eccentricity squared (WGS84)
pub const ECCENTRICITY_SQUARED_WGS84: f64 =
    2.0 * EARTH_FLATTENING_WGS84 - EARTH_FLATTENING_WGS84 * EARTH_FLATTENING_WGS84;

/// UTM central scale factor
const UTM_K0: f64 = 0.9996;
const UTM_FALSE_EASTING: f64 = 500_000.0;
const UTM_FALSE_NORTHING_SOUTH: f64 = 10_000_000.0;

/// UTM zone and hemisphere
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UtmZone {
    /// 1..=60
    pub number: u8,
    pub north: bool,
}

impl UtmZone {
    /// Natural zone for a position
    pub fn for_coordinates(coords: Coordinates) -> Self {
        Self {
            number: zone_number(coords.lon),
            north: coords.lat >= 0.0,
        }
    }

    /// Central meridian of the zone (degrees)
    pub fn central_meridian(&self) -> f64 {
        (self.number as f64 - 1.0) * 6.0 - 180.0 + 3.0
    }
}

/// Projected position in meters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UtmCoordinate {
    pub easting: f64,
    pub northing: f64,
    pub zone: UtmZone,
}

impl UtmCoordinate {
    pub fn as_vector(&self) -> Vector2<f64> {
        Vector2::new(self.easting, self.northing)
    }

    /// Euclidean distance in the projection plane (meters)
    pub fn planar_distance(&self, other: &UtmCoordinate) -> f64 {
        (other.as_vector() - self.as_vector()).norm()
    }
}

/// Zone number for a longitude, clamped into 1..=60
pub fn zone_number(lon: f64) -> u8 {
    let zone = ((lon + 180.0) / 6.0).floor() as i64 + 1;
    zone.clamp(1, 60) as u8
}

/// Project into the position's own zone
pub fn to_utm(coords: Coordinates) -> UtmCoordinate {
    to_utm_in_zone(coords, UtmZone::for_coordinates(coords))
}

/// Project into a fixed zone (positions outside it extend the grid)
pub fn to_utm_in_zone(coords: Coordinates, zone: UtmZone) -> UtmCoordinate {
    let e2 = ECCENTRICITY_SQUARED_WGS84;
    let e4 = e2 * e2;
    let e6 = e4 * e2;
    let ep2 = e2 / (1.0 - e2);

    let lat_rad = coords.lat.to_radians();
    let lon_diff = (coords.lon - zone.central_meridian()).to_radians();

    let sin_lat = lat_rad.sin();
    let cos_lat = lat_rad.cos();
    let tan_lat = lat_rad.tan();

    let n = EARTH_RADIUS_WGS84 / (1.0 - e2 * sin_lat * sin_lat).sqrt();
    let t = tan_lat * tan_lat;
    let c = ep2 * cos_lat * cos_lat;
    let a = cos_lat * lon_diff;

    // Meridional arc
    let m = EARTH_RADIUS_WGS84
        * ((1.0 - e2 / 4.0 - 3.0 * e4 / 64.0 - 5.0 * e6 / 256.0) * lat_rad
            - (3.0 * e2 / 8.0 + 3.0 * e4 / 32.0 + 45.0 * e6 / 1024.0) * (2.0 * lat_rad).sin()
            + (15.0 * e4 / 256.0 + 45.0 * e6 / 1024.0) * (4.0 * lat_rad).sin()
            - (35.0 * e6 / 3072.0) * (6.0 * lat_rad).sin());

    let easting = UTM_FALSE_EASTING
        + UTM_K0
            * n
            * (a + (1.0 - t + c) * a.powi(3) / 6.0
                + (5.0 - 18.0 * t + t * t + 72.0 * c - 58.0 * ep2) * a.powi(5) / 120.0);

    let false_northing = if zone.north { 0.0 } else { UTM_FALSE_NORTHING_SOUTH };
    let northing = false_northing
        + UTM_K0
            * (m + n
                * tan_lat
                * (a * a / 2.0
                    + (5.0 - t + 9.0 * c + 4.0 * c * c) * a.powi(4) / 24.0
                    + (61.0 - 58.0 * t + t * t + 600.0 * c - 330.0 * ep2) * a.powi(6) / 720.0));

    UtmCoordinate { easting, northing, zone }
}

/// Coordinate validation utilities
pub struct CoordinateValidator;

impl CoordinateValidator {
    /// Validate WGS84 geodetic coordinates
    pub fn validate_wgs84(coords: &Coordinates) -> Result<(), &'static str> {
        if !coords.lat.is_finite() || !coords.lon.is_finite() {
            return Err("coordinates must be finite numbers");
        }

        if coords.lat < -90.0 || coords.lat > 90.0 {
            return Err("latitude must be between -90 and 90 degrees");
        }

        if coords.lon < -180.0 || coords.lon > 180.0 {
            return Err("longitude must be between -180 and 180 degrees");
        }

        Ok(())
    }
}
