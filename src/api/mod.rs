//! Engine handle and the types it exposes
//!
//! [`MarkerEngine`] is the entry point. It owns the dataset and reports
//! state changes to registered observers.

pub mod callback;
pub mod engine;
pub mod formatting;
pub mod types;

pub use callback::{EngineEvent, Observer, ObserverHandle, ObserverRegistry};
pub use engine::MarkerEngine;
pub use formatting::{format_distance, format_distance_in, format_distance_km, marker_subtitle, ListEntry};
pub use types::{ArPlacement, EngineStats, LocationRequestHandle, RequestStatus};
