//! Platform collaborators: durable storage and location services

pub mod location;
pub mod mock;
pub mod persistence;

pub use location::{LocationFix, LocationProvider, PermissionStatus};
pub use mock::{InMemoryStore, MockLocationProvider};
pub use persistence::{JsonFileStore, PersistenceStore, FAVORITES_KEY, FILTER_KEY};
