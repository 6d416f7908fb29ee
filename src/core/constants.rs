//! Physical constants and engine tuning parameters

/// Mean Earth radius used by the haversine formula (kilometers)
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Kilometers per statute mile
pub const KM_PER_MILE: f64 = 1.60934;

/// Feet per statute mile
pub const FEET_PER_MILE: f64 = 5280.0;

/// Width of one compass sector (degrees)
pub const COMPASS_SECTOR_DEG: f64 = 22.5;

/// Padding applied to a degenerate bounding-box axis (degrees)
pub const BBOX_PADDING_DEG: f64 = 0.0025;

/// Viewport span multiplier (25% margin around the bounding box)
pub const VIEWPORT_MARGIN: f64 = 1.25;

/// Longitude span at or below which the map switches to detailed imagery
pub const DETAIL_MAP_MAX_LON_SPAN: f64 = 0.025;

/// Markers closer than this (planar meters) are shown in AR without fallback
pub const AR_PROXIMITY_THRESHOLD_M: f64 = 1000.0;

/// Minimum number of markers an AR frame shows when data exists
pub const AR_MIN_MARKERS: usize = 5;

/// Divisor turning a scene z-offset into a marker scale factor
pub const AR_SCALE_DIVISOR: f64 = 15.0;

/// How long a location fix may take before falling back (milliseconds)
pub const LOCATION_TIMEOUT_MS: u64 = 10_000;

/// Default map extent when there is nothing to bound (Nevada statewide)
pub const STATEWIDE_LAT_MIN: f64 = 34.5;
pub const STATEWIDE_LAT_MAX: f64 = 42.5;
pub const STATEWIDE_LON_MIN: f64 = -121.0;
pub const STATEWIDE_LON_MAX: f64 = -112.0;

/// Category selector value matching every category
pub const ALL_CATEGORIES: &str = "all";
