//! Proximity Sorter with change detection
//!
//! With a known location the full dataset is annotated and stable-sorted by
//! great-circle distance. Without one it falls back to title order. A
//! repeated request for the ordering already in place is skipped.

use crate::core::{Coordinates, DistanceUnit, LocationState, Marker, MarkerStore};
use std::cmp::Ordering;
use tracing::debug;

/// Ordering currently applied to the dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Distance,
    Alphabetical,
}

/// Result of a sort request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOutcome {
    Resorted(SortOrder),
    /// Same reference as last time; nothing recomputed
    Unchanged,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum AppliedOrder {
    Distance(Coordinates),
    Alphabetical,
}

#[derive(Debug, Clone, Default)]
pub struct ProximitySorter {
    unit: DistanceUnit,
    applied: Option<AppliedOrder>,
}

impl ProximitySorter {
    pub fn new(unit: DistanceUnit) -> Self {
        Self { unit, applied: None }
    }

    pub fn unit(&self) -> DistanceUnit {
        self.unit
    }

    /// Reference location of the ordering in place, if it is by distance
    pub fn last_reference(&self) -> Option<Coordinates> {
        match self.applied {
            Some(AppliedOrder::Distance(reference)) => Some(reference),
            _ => None,
        }
    }

    pub fn current_order(&self) -> Option<SortOrder> {
        self.applied.map(|applied| match applied {
            AppliedOrder::Distance(_) => SortOrder::Distance,
            AppliedOrder::Alphabetical => SortOrder::Alphabetical,
        })
    }

    /// Forget the applied ordering so the next request always sorts
    pub fn invalidate(&mut self) {
        self.applied = None;
    }

    /// Pick distance or title order from the location state
    pub fn apply_location(&mut self, store: &mut MarkerStore, location: &LocationState) -> SortOutcome {
        match location.coordinates() {
            Some(reference) => self.sort_by_distance(store, reference),
            None => self.sort_alphabetical(store),
        }
    }

    /// Annotate every marker from `reference` and stable-sort by distance
    ///
    /// Exact equality with the previous reference skips the work entirely.
    pub fn sort_by_distance(&mut self, store: &mut MarkerStore, reference: Coordinates) -> SortOutcome {
        if self.applied == Some(AppliedOrder::Distance(reference)) {
            debug!(lon = reference.lon, lat = reference.lat, "location unchanged, skipping re-sort");
            return SortOutcome::Unchanged;
        }

        store.annotate_distances(reference, self.unit);
        store.reorder_with(order_by_distance);
        self.applied = Some(AppliedOrder::Distance(reference));
        debug!(count = store.len(), "re-sorted by distance");
        SortOutcome::Resorted(SortOrder::Distance)
    }

    /// Title order; derived fields are dropped since no fix backs them
    pub fn sort_alphabetical(&mut self, store: &mut MarkerStore) -> SortOutcome {
        if self.applied == Some(AppliedOrder::Alphabetical) {
            return SortOutcome::Unchanged;
        }

        store.clear_distances();
        store.reorder_with(order_by_title);
        self.applied = Some(AppliedOrder::Alphabetical);
        debug!(count = store.len(), "re-sorted by title");
        SortOutcome::Resorted(SortOrder::Alphabetical)
    }
}

/// Stable ascending sort on derived distance; unannotated markers go last
pub fn order_by_distance(markers: &mut [Marker]) {
    markers.sort_by(|a, b| match (a.distance(), b.distance()) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

/// Stable sort on title by code point (case-sensitive)
pub fn order_by_title(markers: &mut [Marker]) {
    markers.sort_by(|a, b| a.title.cmp(&b.title));
}
