//! Bounding boxes and map viewports for marker sets

use crate::core::constants::{
    BBOX_PADDING_DEG, DETAIL_MAP_MAX_LON_SPAN, STATEWIDE_LAT_MAX, STATEWIDE_LAT_MIN, STATEWIDE_LON_MAX,
    STATEWIDE_LON_MIN, VIEWPORT_MARGIN,
};
use crate::core::Marker;
use serde::{Deserialize, Serialize};

/// Axis-aligned extent in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

impl BoundingBox {
    /// Extent used when there is nothing to bound
    pub fn statewide() -> Self {
        Self {
            lat_min: STATEWIDE_LAT_MIN,
            lat_max: STATEWIDE_LAT_MAX,
            lon_min: STATEWIDE_LON_MIN,
            lon_max: STATEWIDE_LON_MAX,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.lat_min <= self.lat_max && self.lon_min <= self.lon_max
    }
}

/// Map camera region: centre plus padded spans
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub center_lat: f64,
    pub center_lon: f64,
    pub lat_span: f64,
    pub lon_span: f64,
}

/// Base map rendering suggested for a viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapStyle {
    /// Muted street map for wide views
    Muted,
    /// Hybrid imagery once zoomed in close
    Detailed,
}

impl MapStyle {
    pub fn for_viewport(viewport: &Viewport, max_detail_lon_span: f64) -> Self {
        if viewport.lon_span <= max_detail_lon_span {
            MapStyle::Detailed
        } else {
            MapStyle::Muted
        }
    }
}

/// Viewport math parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub fallback_extent: BoundingBox,
    /// Padding added to each side of a zero-width axis (degrees)
    pub padding_deg: f64,
    /// Span multiplier applied by [`to_viewport`]
    pub margin: f64,
    pub detail_max_lon_span: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            fallback_extent: BoundingBox::statewide(),
            padding_deg: BBOX_PADDING_DEG,
            margin: VIEWPORT_MARGIN,
            detail_max_lon_span: DETAIL_MAP_MAX_LON_SPAN,
        }
    }
}

/// Extent of `markers`; empty input yields the fallback extent
///
/// An axis with zero width (a single marker, or markers on one parallel or
/// meridian) is widened by `padding_deg` on both sides.
pub fn bounding_box<'a, I>(markers: I, config: &ViewportConfig) -> BoundingBox
where
    I: IntoIterator<Item = &'a Marker>,
{
    let mut extent: Option<BoundingBox> = None;

    for marker in markers {
        let (lon, lat) = (marker.coordinates.lon, marker.coordinates.lat);
        let bbox = extent.get_or_insert(BoundingBox {
            lat_min: lat,
            lat_max: lat,
            lon_min: lon,
            lon_max: lon,
        });
        bbox.lat_min = bbox.lat_min.min(lat);
        bbox.lat_max = bbox.lat_max.max(lat);
        bbox.lon_min = bbox.lon_min.min(lon);
        bbox.lon_max = bbox.lon_max.max(lon);
    }

    let Some(mut bbox) = extent else {
        return config.fallback_extent;
    };

    if bbox.lat_min == bbox.lat_max {
        bbox.lat_min -= config.padding_deg;
        bbox.lat_max += config.padding_deg;
    }
    if bbox.lon_min == bbox.lon_max {
        bbox.lon_min -= config.padding_deg;
        bbox.lon_max += config.padding_deg;
    }

    bbox
}

pub fn to_viewport(bbox: &BoundingBox, margin: f64) -> Viewport {
    Viewport {
        center_lat: (bbox.lat_min + bbox.lat_max) / 2.0,
        center_lon: (bbox.lon_min + bbox.lon_max) / 2.0,
        lat_span: (bbox.lat_max - bbox.lat_min).abs() * margin,
        lon_span: (bbox.lon_max - bbox.lon_min).abs() * margin,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Coordinates;

    fn at(id: &str, lon: f64, lat: f64) -> Marker {
        Marker::new(id, id, "Lyon", Coordinates::new(lon, lat))
    }

    #[test]
    fn test_empty_uses_fallback() {
        let config = ViewportConfig::default();
        let markers: Vec<Marker> = Vec::new();
        assert_eq!(
            bounding_box(&markers, &config),
            BoundingBox {
                lat_min: 34.5,
                lat_max: 42.5,
                lon_min: -121.0,
                lon_max: -112.0,
            }
        );
    }

    #[test]
    fn test_single_marker_padded_on_both_axes() {
        let markers = vec![at("a", -119.5, 39.0)];
        let bbox = bounding_box(&markers, &ViewportConfig::default());

        assert!((bbox.lat_max - bbox.lat_min - 0.005).abs() < 1e-12);
        assert!((bbox.lon_max - bbox.lon_min - 0.005).abs() < 1e-12);
        assert!(bbox.lat_min < 39.0 && bbox.lat_max > 39.0);
    }

    #[test]
    fn test_shared_latitude_pads_only_latitude() {
        let markers = vec![at("a", -119.5, 39.0), at("b", -118.5, 39.0)];
        let bbox = bounding_box(&markers, &ViewportConfig::default());

        assert_eq!(bbox.lon_min, -119.5);
        assert_eq!(bbox.lon_max, -118.5);
        assert!((bbox.lat_min - (39.0 - 0.0025)).abs() < 1e-12);
        assert!((bbox.lat_max - (39.0 + 0.0025)).abs() < 1e-12);
    }

    #[test]
    fn test_extent_of_several_markers() {
        let markers = vec![at("a", -119.5, 39.0), at("b", -115.1, 36.2), at("c", -117.0, 41.0)];
        let bbox = bounding_box(&markers, &ViewportConfig::default());
        assert_eq!(
            bbox,
            BoundingBox {
                lat_min: 36.2,
                lat_max: 41.0,
                lon_min: -119.5,
                lon_max: -115.1,
            }
        );
        assert!(bbox.is_valid());
    }

    #[test]
    fn test_viewport_centre_and_margin() {
        let bbox = BoundingBox {
            lat_min: 38.0,
            lat_max: 40.0,
            lon_min: -120.0,
            lon_max: -116.0,
        };
        let viewport = to_viewport(&bbox, 1.25);
        assert_eq!(viewport.center_lat, 39.0);
        assert_eq!(viewport.center_lon, -118.0);
        assert_eq!(viewport.lat_span, 2.5);
        assert_eq!(viewport.lon_span, 5.0);
    }

    #[test]
    fn test_single_marker_viewport_never_zero() {
        let markers = vec![at("a", -119.5, 39.0)];
        let viewport = to_viewport(&bounding_box(&markers, &ViewportConfig::default()), VIEWPORT_MARGIN);
        assert!(viewport.lat_span > 0.0 && viewport.lon_span > 0.0);
        assert_eq!(MapStyle::for_viewport(&viewport, DETAIL_MAP_MAX_LON_SPAN), MapStyle::Detailed);

        let statewide = to_viewport(&BoundingBox::statewide(), VIEWPORT_MARGIN);
        assert_eq!(MapStyle::for_viewport(&statewide, DETAIL_MAP_MAX_LON_SPAN), MapStyle::Muted);
    }
}
