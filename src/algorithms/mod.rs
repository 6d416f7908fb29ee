//! Geodesy, projection and AR placement

pub mod geodesy;
pub mod projection;
pub mod ar;

pub use geodesy::{distance_and_bearing, CompassPoint, GeodesicVector};
pub use projection::{CoordinateValidator, UtmCoordinate, UtmZone};
pub use ar::{ArConfig, ArFrame, ArPlacement, ArProjector};
