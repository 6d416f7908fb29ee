//! Geospatial marker engine
//!
//! Keeps a filtered, proximity-sorted view of a fixed point-of-interest
//! dataset in step with search text, category, favorites and live device
//! location, and projects nearby markers into a local AR scene frame.

pub mod core;
pub mod algorithms;
pub mod processing;
pub mod validation;
pub mod utils;
pub mod platform;
pub mod api;

// Re-export commonly used types
pub use core::{Coordinates, DistanceUnit, LocationState, Marker, MarkerAttributes, MarkerId, MarkerStore, UnavailableReason};
pub use algorithms::{distance_and_bearing, ArConfig, ArFrame, ArPlacement, CompassPoint, GeodesicVector};
pub use processing::{
    parse_feature_collection, BoundingBox, CategorySelector, FavoritesSet, Filter, MapStyle, SortOrder, SortOutcome,
    Viewport,
};
pub use validation::{ConfigError, EngineError, EngineResult, PersistenceError};
pub use utils::EngineConfig;
pub use platform::{
    InMemoryStore, JsonFileStore, LocationFix, LocationProvider, MockLocationProvider, PermissionStatus,
    PersistenceStore,
};
pub use api::{EngineEvent, EngineStats, ListEntry, LocationRequestHandle, MarkerEngine, ObserverHandle, RequestStatus};
