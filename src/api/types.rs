//! Common API types

use serde::Serialize;

pub use crate::algorithms::ar::ArPlacement;

/// Handle for an outstanding location fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocationRequestHandle(u32);

impl LocationRequestHandle {
    pub(crate) fn new(id: u32) -> Self {
        LocationRequestHandle(id)
    }

    pub fn id(&self) -> u32 {
        self.0
    }
}

/// What happened to a delivered location fetch result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestStatus {
    /// The result was applied to the engine's location state
    Applied,
    /// The request was cancelled or never issued; nothing changed
    Discarded,
}

/// Running counters for engine activity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EngineStats {
    /// Full re-sorts of the dataset (distance or title)
    pub resorts: u64,
    /// Location updates skipped because nothing changed
    pub skipped_location_updates: u64,
    /// Times the filtered view was rebuilt
    pub filter_applications: u64,
    pub persistence_failures: u64,
    /// Fetch results dropped after cancellation
    pub discarded_location_results: u64,
}
