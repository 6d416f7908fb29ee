//! Dataset parsing, filtering, ordering and viewport math

pub mod filter;
pub mod sorter;
pub mod viewport;
pub mod parser;

pub use filter::{CategorySelector, FavoritesSet, Filter};
pub use sorter::{ProximitySorter, SortOrder, SortOutcome};
pub use viewport::{BoundingBox, MapStyle, Viewport, ViewportConfig};
pub use parser::parse_feature_collection;
