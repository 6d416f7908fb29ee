//! Marker engine: the single owner of dataset, view and location state
//!
//! Every mutation runs to completion (derived fields, ordering, filtered
//! view, persistence write) before observers are told about it. Persistence
//! writes are fire-and-forget: a failure is logged, counted and reported as
//! an event, but the in-memory change stands.

use crate::algorithms::ar::{ArFrame, ArProjector};
use crate::algorithms::projection::CoordinateValidator;
use crate::api::callback::{EngineEvent, Observer, ObserverHandle, ObserverRegistry};
use crate::api::formatting::ListEntry;
use crate::api::types::{EngineStats, LocationRequestHandle, RequestStatus};
use crate::core::constants::ALL_CATEGORIES;
use crate::core::{Coordinates, LocationState, Marker, MarkerId, MarkerStore, UnavailableReason};
use crate::platform::location::{LocationFix, LocationProvider, PermissionStatus};
use crate::platform::persistence::{PersistenceStore, FAVORITES_KEY, FILTER_KEY};
use crate::processing::filter::{self, CategorySelector, FavoritesSet, Filter};
use crate::processing::parser::parse_feature_collection;
use crate::processing::sorter::{ProximitySorter, SortOutcome};
use crate::processing::viewport::{self, BoundingBox, MapStyle, Viewport};
use crate::utils::config::EngineConfig;
use crate::validation::error::{EngineError, EngineResult, PersistenceError};
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use tracing::{debug, info, warn};

pub struct MarkerEngine {
    config: EngineConfig,
    store: MarkerStore,
    sorter: ProximitySorter,
    filter: Filter,
    favorites: FavoritesSet,
    /// Positions into the store's current order that pass the filter
    view: Vec<usize>,
    location: LocationState,
    /// Most recent accepted fix, kept as the timeout fallback
    last_fix: Option<Coordinates>,
    ar: ArProjector,
    ar_frame: ArFrame,
    persistence: Box<dyn PersistenceStore>,
    observers: ObserverRegistry,
    request_counter: u32,
    pending_requests: HashSet<LocationRequestHandle>,
    stats: EngineStats,
}

impl MarkerEngine {
    /// Validate the dataset, restore saved filter and favorites, and build
    /// the initial (title-ordered) view
    pub fn load_dataset(
        markers: Vec<Marker>,
        config: EngineConfig,
        persistence: Box<dyn PersistenceStore>,
    ) -> EngineResult<Self> {
        config.validate()?;
        let store = MarkerStore::new(markers)?;

        let filter: Filter = restore(FILTER_KEY, persistence.read_filter());
        let favorites: FavoritesSet = restore(FAVORITES_KEY, persistence.read_favorites());

        let mut engine = Self {
            sorter: ProximitySorter::new(config.distance_unit),
            ar: ArProjector::new(config.ar.clone()),
            config,
            store,
            filter,
            favorites,
            view: Vec::new(),
            location: LocationState::Unknown,
            last_fix: None,
            ar_frame: ArFrame::default(),
            persistence,
            observers: ObserverRegistry::new(),
            request_counter: 0,
            pending_requests: HashSet::new(),
            stats: EngineStats::default(),
        };

        if let SortOutcome::Resorted(_) = engine.sorter.apply_location(&mut engine.store, &engine.location) {
            engine.stats.resorts += 1;
        }
        engine.rebuild_view();

        info!(
            markers = engine.store.len(),
            categories = engine.store.categories().len(),
            favorites = engine.favorites.len(),
            "dataset loaded"
        );
        Ok(engine)
    }

    /// Parse a GeoJSON `FeatureCollection` and load it
    pub fn from_geojson(
        json: &str,
        config: EngineConfig,
        persistence: Box<dyn PersistenceStore>,
    ) -> EngineResult<Self> {
        let markers = parse_feature_collection(json)?;
        Self::load_dataset(markers, config, persistence)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn stats(&self) -> EngineStats {
        self.stats
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Full dataset in its current order
    pub fn markers(&self) -> &[Marker] {
        self.store.markers()
    }

    pub fn lookup(&self, id: &MarkerId) -> EngineResult<&Marker> {
        self.store.lookup(id)
    }

    /// Category picker entries: "all" followed by every dataset category
    pub fn categories(&self) -> Vec<String> {
        let mut categories = vec![ALL_CATEGORIES.to_string()];
        categories.extend(self.store.categories());
        categories
    }

    // Filter and view

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    /// Replace the filter, rebuild the view and persist the new filter
    pub fn set_filter(
        &mut self,
        search_text: impl Into<String>,
        category: impl Into<CategorySelector>,
        favorites_only: bool,
    ) {
        self.apply_filter(Filter::new(search_text, category, favorites_only));
    }

    pub fn apply_filter(&mut self, filter: Filter) {
        self.filter = filter;
        self.rebuild_view();
        debug!(
            search = %self.filter.search_text,
            category = self.filter.category.as_str(),
            favorites_only = self.filter.favorites_only,
            visible = self.view.len(),
            "filter applied"
        );

        let mut events = vec![EngineEvent::FilterChanged];
        if let Err(error) = self.write_filter() {
            events.push(self.persistence_failed(FILTER_KEY, error));
        }
        self.observers.notify_all(&events);
    }

    /// Markers passing the filter, in current sort order
    pub fn get_filtered_view(&self) -> Vec<&Marker> {
        let markers = self.store.markers();
        self.view.iter().map(|&position| &markers[position]).collect()
    }

    pub fn visible_count(&self) -> usize {
        self.view.len()
    }

    /// The filtered view rendered as list rows
    pub fn list_entries(&self) -> Vec<ListEntry> {
        let known = self.location.is_known();
        self.get_filtered_view()
            .into_iter()
            .map(|marker| ListEntry::new(marker, known, self.config.distance_unit))
            .collect()
    }

    // Favorites

    pub fn favorites(&self) -> &FavoritesSet {
        &self.favorites
    }

    pub fn is_favorite(&self, id: &MarkerId) -> bool {
        self.favorites.contains(id)
    }

    /// Flip a marker's favorite status; returns whether it is now a favorite
    pub fn toggle_favorite(&mut self, id: &MarkerId) -> EngineResult<bool> {
        self.store.lookup(id)?;
        let is_favorite = self.favorites.toggle(id);
        self.rebuild_view();
        debug!(%id, is_favorite, "favorite toggled");

        let mut events = vec![EngineEvent::FavoritesChanged {
            id: id.clone(),
            is_favorite,
        }];
        if let Err(error) = self.write_favorites() {
            events.push(self.persistence_failed(FAVORITES_KEY, error));
        }
        self.observers.notify_all(&events);
        Ok(is_favorite)
    }

    // Location

    pub fn location_state(&self) -> LocationState {
        self.location
    }

    /// Accept a device fix and re-sort by distance
    ///
    /// A fix identical to the one the current order was built from is a
    /// no-op and reports [`SortOutcome::Unchanged`].
    pub fn update_location(&mut self, lon: f64, lat: f64) -> EngineResult<SortOutcome> {
        let coords = validate_device(lon, lat)?;
        Ok(self.transition(LocationState::Known(coords)))
    }

    /// Drop the device location; the view falls back to title order
    pub fn clear_location(&mut self) -> SortOutcome {
        self.forget_location(UnavailableReason::Cleared)
    }

    /// Resolve a fresh location through `provider`
    ///
    /// Denied permission makes the location unavailable. A timeout keeps the
    /// last known fix when there is one.
    pub fn refresh_location(&mut self, provider: &mut dyn LocationProvider) -> LocationState {
        if provider.request_permission() == PermissionStatus::Denied {
            info!("location permission denied");
            self.forget_location(UnavailableReason::PermissionDenied);
            return self.location;
        }

        let fix = provider.get_location(self.config.location_timeout());
        self.resolve_fix(fix);
        self.location
    }

    /// Start a location fetch whose result arrives later
    pub fn begin_location_request(&mut self) -> LocationRequestHandle {
        self.request_counter += 1;
        let handle = LocationRequestHandle::new(self.request_counter);
        self.pending_requests.insert(handle);
        debug!(request = handle.id(), "location request started");
        handle
    }

    /// Deliver the result of a fetch started with [`Self::begin_location_request`]
    ///
    /// Results for cancelled or unknown handles are dropped without touching
    /// any state.
    pub fn complete_location_request(&mut self, handle: LocationRequestHandle, fix: LocationFix) -> RequestStatus {
        if !self.pending_requests.remove(&handle) {
            debug!(request = handle.id(), "discarding result of cancelled location request");
            self.stats.discarded_location_results += 1;
            return RequestStatus::Discarded;
        }

        self.resolve_fix(fix);
        RequestStatus::Applied
    }

    /// Cancel an outstanding fetch; its eventual result will be discarded
    pub fn cancel_location_request(&mut self, handle: LocationRequestHandle) -> EngineResult<()> {
        if self.pending_requests.remove(&handle) {
            debug!(request = handle.id(), "location request cancelled");
            Ok(())
        } else {
            Err(EngineError::InvalidRequest {
                reason: format!("no pending location request {}", handle.id()),
            })
        }
    }

    pub fn pending_location_requests(&self) -> usize {
        self.pending_requests.len()
    }

    // Map

    /// Extent of `markers` using the configured padding and fallback
    pub fn bounding_box_for<'a, I>(&self, markers: I) -> BoundingBox
    where
        I: IntoIterator<Item = &'a Marker>,
    {
        viewport::bounding_box(markers, &self.config.viewport)
    }

    pub fn viewport_for(&self, bbox: &BoundingBox) -> Viewport {
        viewport::to_viewport(bbox, self.config.viewport.margin)
    }

    pub fn map_style_for(&self, viewport: &Viewport) -> MapStyle {
        MapStyle::for_viewport(viewport, self.config.viewport.detail_max_lon_span)
    }

    /// Viewport enclosing the current filtered view
    pub fn view_viewport(&self) -> Viewport {
        let bbox = self.bounding_box_for(self.get_filtered_view());
        self.viewport_for(&bbox)
    }

    // AR

    /// Rebuild the AR frame for a device fix and optional heading
    ///
    /// The fix is applied as a location update first, so the fallback
    /// selection is the prefix of the list order around the device.
    pub fn update_ar_frame(&mut self, lon: f64, lat: f64, heading: Option<f64>) -> EngineResult<&ArFrame> {
        let device = validate_device(lon, lat)?;
        if let Some(h) = heading {
            self.ar.set_heading(h);
        }
        self.transition(LocationState::Known(device));
        debug!(placements = self.ar_frame.placements.len(), "AR frame rebuilt");
        Ok(&self.ar_frame)
    }

    /// Rebuild the AR frame for a new heading at the last device fix
    pub fn update_heading(&mut self, heading: f64) -> &ArFrame {
        self.ar_frame = self.ar.update_heading(heading, self.store.markers());
        &self.ar_frame
    }

    pub fn ar_frame(&self) -> &ArFrame {
        &self.ar_frame
    }

    // Observers

    pub fn register_observer(&mut self, observer: Observer) -> ObserverHandle {
        self.observers.register(observer)
    }

    pub fn unregister_observer(&mut self, handle: ObserverHandle) -> EngineResult<()> {
        self.observers.unregister(handle)
    }

    fn resolve_fix(&mut self, fix: LocationFix) {
        let coords = match fix {
            LocationFix::Fix(coords) => match CoordinateValidator::validate_wgs84(&coords) {
                Ok(()) => Some(coords),
                Err(reason) => {
                    warn!(lon = coords.lon, lat = coords.lat, reason, "ignoring invalid location fix");
                    None
                }
            },
            LocationFix::TimedOut => None,
        };

        match (coords, self.last_fix) {
            (Some(coords), _) => {
                self.transition(LocationState::Known(coords));
            }
            (None, Some(last)) => {
                info!(lon = last.lon, lat = last.lat, "location fetch timed out, keeping last known fix");
                self.transition(LocationState::Known(last));
            }
            (None, None) => {
                info!("location fetch timed out");
                self.transition(LocationState::Unavailable(UnavailableReason::TimedOut));
            }
        }
    }

    fn forget_location(&mut self, reason: UnavailableReason) -> SortOutcome {
        if !self.pending_requests.is_empty() {
            debug!(count = self.pending_requests.len(), "dropping outstanding location requests");
            self.pending_requests.clear();
        }
        self.last_fix = None;
        self.ar.reset();
        self.ar_frame = ArFrame::default();
        self.transition(LocationState::Unavailable(reason))
    }

    /// Move to `state`, re-sorting if the ordering it implies differs
    fn transition(&mut self, state: LocationState) -> SortOutcome {
        let mut events = Vec::new();
        if self.location != state {
            self.location = state;
            events.push(EngineEvent::LocationChanged(state));
        }
        if let Some(coords) = state.coordinates() {
            self.last_fix = Some(coords);
            self.ar.set_device(coords);
        }

        let outcome = self.sorter.apply_location(&mut self.store, &self.location);
        match outcome {
            SortOutcome::Resorted(order) => {
                self.stats.resorts += 1;
                self.rebuild_view();
                info!(?order, count = self.store.len(), "view re-sorted");
                events.push(EngineEvent::ViewResorted { order });
            }
            SortOutcome::Unchanged => {
                self.stats.skipped_location_updates += 1;
                debug!("location update skipped");
            }
        }

        if state.is_known() {
            self.ar_frame = self.ar.frame(self.store.markers());
        }

        self.observers.notify_all(&events);
        outcome
    }

    fn rebuild_view(&mut self) {
        self.view = filter::apply_indices(&self.filter, &self.favorites, self.store.markers());
        self.stats.filter_applications += 1;
    }

    fn write_filter(&mut self) -> Result<(), PersistenceError> {
        let blob = encode(FILTER_KEY, &self.filter)?;
        self.persistence.write_filter(&blob)
    }

    fn write_favorites(&mut self) -> Result<(), PersistenceError> {
        let blob = encode(FAVORITES_KEY, &self.favorites)?;
        self.persistence.write_favorites(&blob)
    }

    fn persistence_failed(&mut self, what: &str, error: PersistenceError) -> EngineEvent {
        warn!(%error, what, "persistence write failed; keeping in-memory state");
        self.stats.persistence_failures += 1;
        EngineEvent::PersistenceFailed { what: what.to_string() }
    }
}

fn validate_device(lon: f64, lat: f64) -> EngineResult<Coordinates> {
    let coords = Coordinates::new(lon, lat);
    CoordinateValidator::validate_wgs84(&coords).map_err(|reason| EngineError::InvalidRequest {
        reason: format!("device location ({}, {}): {}", lon, lat, reason),
    })?;
    Ok(coords)
}

fn encode<T: serde::Serialize>(key: &str, value: &T) -> Result<String, PersistenceError> {
    serde_json::to_string(value).map_err(|e| PersistenceError::WriteFailed {
        key: key.to_string(),
        message: e.to_string(),
    })
}

/// Decode a saved blob, falling back to the default when absent or unreadable
fn restore<T>(key: &str, read: Result<Option<String>, PersistenceError>) -> T
where
    T: DeserializeOwned + Default,
{
    let blob = match read {
        Ok(Some(blob)) => blob,
        Ok(None) => return T::default(),
        Err(error) => {
            warn!(%error, key, "could not read saved state, using defaults");
            return T::default();
        }
    };

    match serde_json::from_str(&blob) {
        Ok(value) => value,
        Err(source) => {
            let error = PersistenceError::Corrupt {
                key: key.to_string(),
                source,
            };
            warn!(%error, key, "saved state is unreadable, using defaults");
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::{InMemoryStore, MockLocationProvider};
    use crate::processing::sorter::SortOrder;

    fn sample() -> Vec<Marker> {
        vec![
            Marker::new("m1", "Fort Churchill", "Lyon", Coordinates::new(-119.2669, 39.2950)),
            Marker::new("m2", "City Hall", "Carson City", Coordinates::new(-119.7674, 39.1638)),
            Marker::new("m3", "Las Vegas Springs", "Clark", Coordinates::new(-115.1398, 36.1699)),
        ]
    }

    fn engine_with(store: &InMemoryStore) -> MarkerEngine {
        MarkerEngine::load_dataset(sample(), EngineConfig::default(), Box::new(store.clone())).unwrap()
    }

    fn titles(engine: &MarkerEngine) -> Vec<&str> {
        engine.get_filtered_view().iter().map(|m| m.title.as_str()).collect()
    }

    #[test]
    fn test_initial_view_is_alphabetical() {
        let engine = engine_with(&InMemoryStore::new());
        assert_eq!(titles(&engine), vec!["City Hall", "Fort Churchill", "Las Vegas Springs"]);
        assert_eq!(engine.location_state(), LocationState::Unknown);
        assert!(engine.filter().is_unfiltered());
        assert_eq!(engine.stats().resorts, 1);
    }

    #[test]
    fn test_restores_saved_filter_and_favorites() {
        let store = InMemoryStore::with_blobs(
            Some(r#"{"search":"","favorites":"favorites","county":"all"}"#),
            Some(r#"["m3"]"#),
        );
        let engine = engine_with(&store);
        assert!(engine.filter().favorites_only);
        assert_eq!(titles(&engine), vec!["Las Vegas Springs"]);
    }

    #[test]
    fn test_corrupt_saved_state_falls_back_to_defaults() {
        let store = InMemoryStore::with_blobs(Some("{not json"), Some(r#"{"a":1}"#));
        let engine = engine_with(&store);
        assert!(engine.filter().is_unfiltered());
        assert!(engine.favorites().is_empty());
        assert_eq!(engine.visible_count(), 3);
    }

    #[test]
    fn test_unreadable_store_falls_back_to_defaults() {
        let store = InMemoryStore::new();
        store.fail_reads(true);
        let engine = engine_with(&store);
        assert!(engine.filter().is_unfiltered());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = EngineConfig::default();
        config.ar.scale_divisor = 0.0;
        let result = MarkerEngine::load_dataset(sample(), config, Box::new(InMemoryStore::new()));
        assert!(matches!(result, Err(EngineError::Config(_))));
    }

    #[test]
    fn test_set_filter_persists_in_original_format() {
        let store = InMemoryStore::new();
        let mut engine = engine_with(&store);

        engine.set_filter("fort", "Lyon", false);
        assert_eq!(titles(&engine), vec!["Fort Churchill"]);

        let saved: serde_json::Value = serde_json::from_str(&store.blob(FILTER_KEY).unwrap()).unwrap();
        assert_eq!(
            saved,
            serde_json::json!({"search": "fort", "favorites": "all", "county": "Lyon"})
        );
    }

    #[test]
    fn test_category_is_exact_match() {
        let mut engine = engine_with(&InMemoryStore::new());
        engine.set_filter("", "Carson", false);
        assert!(engine.get_filtered_view().is_empty());
        engine.set_filter("", "Carson City", false);
        assert_eq!(titles(&engine), vec!["City Hall"]);
    }

    #[test]
    fn test_toggle_favorite() {
        let store = InMemoryStore::new();
        let mut engine = engine_with(&store);
        engine.set_filter("", "all", true);
        assert!(engine.get_filtered_view().is_empty());

        assert!(engine.toggle_favorite(&MarkerId::from("m1")).unwrap());
        assert_eq!(titles(&engine), vec!["Fort Churchill"]);
        assert_eq!(store.blob(FAVORITES_KEY).as_deref(), Some(r#"["m1"]"#));

        assert!(!engine.toggle_favorite(&MarkerId::from("m1")).unwrap());
        assert!(engine.get_filtered_view().is_empty());
    }

    #[test]
    fn test_toggle_unknown_favorite_is_not_found() {
        let store = InMemoryStore::new();
        let mut engine = engine_with(&store);
        assert!(matches!(
            engine.toggle_favorite(&MarkerId::from("nope")),
            Err(EngineError::NotFound { .. })
        ));
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn test_location_sorts_by_distance_and_skips_repeats() {
        let mut engine = engine_with(&InMemoryStore::new());

        let outcome = engine.update_location(-119.7674, 39.1638).unwrap();
        assert_eq!(outcome, SortOutcome::Resorted(SortOrder::Distance));
        assert_eq!(titles(&engine), vec!["City Hall", "Fort Churchill", "Las Vegas Springs"]);
        assert!(engine.markers()[0].distance().unwrap() < 0.01);

        let resorts = engine.stats().resorts;
        assert_eq!(engine.update_location(-119.7674, 39.1638).unwrap(), SortOutcome::Unchanged);
        assert_eq!(engine.stats().resorts, resorts);
        assert_eq!(engine.stats().skipped_location_updates, 1);
    }

    #[test]
    fn test_invalid_device_location_rejected() {
        let mut engine = engine_with(&InMemoryStore::new());
        assert!(matches!(
            engine.update_location(200.0, 39.0),
            Err(EngineError::InvalidRequest { .. })
        ));
        assert_eq!(engine.location_state(), LocationState::Unknown);
    }

    #[test]
    fn test_clear_location_falls_back_to_titles() {
        let mut engine = engine_with(&InMemoryStore::new());
        engine.update_location(-115.1398, 36.1699).unwrap();
        assert_eq!(engine.get_filtered_view()[0].title, "Las Vegas Springs");

        assert_eq!(engine.clear_location(), SortOutcome::Resorted(SortOrder::Alphabetical));
        assert_eq!(
            engine.location_state(),
            LocationState::Unavailable(UnavailableReason::Cleared)
        );
        assert_eq!(titles(&engine), vec!["City Hall", "Fort Churchill", "Las Vegas Springs"]);
        assert!(engine.markers().iter().all(|m| m.derived.is_none()));
    }

    #[test]
    fn test_refresh_location_permission_denied() {
        let mut engine = engine_with(&InMemoryStore::new());
        let mut provider = MockLocationProvider::new(PermissionStatus::Denied);

        let state = engine.refresh_location(&mut provider);
        assert_eq!(state, LocationState::Unavailable(UnavailableReason::PermissionDenied));
        assert_eq!(provider.last_timeout(), None);
    }

    #[test]
    fn test_refresh_location_timeout_keeps_last_fix() {
        let mut engine = engine_with(&InMemoryStore::new());
        let mut provider = MockLocationProvider::at(-119.7674, 39.1638);

        assert!(engine.refresh_location(&mut provider).is_known());
        assert_eq!(provider.last_timeout(), Some(engine.config().location_timeout()));

        // queue is now empty, so the next fetch times out
        let state = engine.refresh_location(&mut provider);
        assert_eq!(state, LocationState::Known(Coordinates::new(-119.7674, 39.1638)));
    }

    #[test]
    fn test_refresh_location_timeout_without_fix() {
        let mut engine = engine_with(&InMemoryStore::new());
        let mut provider = MockLocationProvider::new(PermissionStatus::Granted);
        provider.push_timeout();

        let state = engine.refresh_location(&mut provider);
        assert_eq!(state, LocationState::Unavailable(UnavailableReason::TimedOut));
        assert_eq!(titles(&engine), vec!["City Hall", "Fort Churchill", "Las Vegas Springs"]);
    }

    #[test]
    fn test_cancelled_request_result_discarded() {
        let mut engine = engine_with(&InMemoryStore::new());
        let handle = engine.begin_location_request();
        assert_eq!(engine.pending_location_requests(), 1);

        engine.cancel_location_request(handle).unwrap();
        let status = engine.complete_location_request(
            handle,
            LocationFix::Fix(Coordinates::new(-115.1398, 36.1699)),
        );

        assert_eq!(status, RequestStatus::Discarded);
        assert_eq!(engine.location_state(), LocationState::Unknown);
        assert_eq!(engine.stats().discarded_location_results, 1);
        assert!(engine.cancel_location_request(handle).is_err());
    }

    #[test]
    fn test_completed_request_applied() {
        let mut engine = engine_with(&InMemoryStore::new());
        let handle = engine.begin_location_request();
        let status = engine.complete_location_request(
            handle,
            LocationFix::Fix(Coordinates::new(-115.1398, 36.1699)),
        );
        assert_eq!(status, RequestStatus::Applied);
        assert_eq!(engine.get_filtered_view()[0].title, "Las Vegas Springs");
        assert_eq!(engine.pending_location_requests(), 0);
    }

    #[test]
    fn test_categories_start_with_all() {
        let engine = engine_with(&InMemoryStore::new());
        assert_eq!(engine.categories(), vec!["all", "Carson City", "Clark", "Lyon"]);
    }

    #[test]
    fn test_ar_frame_requires_heading() {
        let mut engine = engine_with(&InMemoryStore::new());
        assert!(engine.update_ar_frame(-119.7674, 39.1638, None).unwrap().is_empty());

        let frame = engine.update_heading(10.0);
        assert_eq!(frame.placements.len(), 3);
        assert_eq!(frame.placements[0].marker_id.as_str(), "m2");
        assert!(engine.location_state().is_known());
        assert_eq!(engine.get_filtered_view()[0].id.as_str(), "m2");
    }

    #[test]
    fn test_clearing_location_drops_outstanding_requests() {
        let mut engine = engine_with(&InMemoryStore::new());
        let handle = engine.begin_location_request();
        engine.begin_location_request();

        engine.clear_location();
        assert_eq!(engine.pending_location_requests(), 0);

        let status = engine.complete_location_request(
            handle,
            LocationFix::Fix(Coordinates::new(-115.1398, 36.1699)),
        );
        assert_eq!(status, RequestStatus::Discarded);
        assert_eq!(engine.location_state(), LocationState::Unavailable(UnavailableReason::Cleared));
        assert_eq!(engine.stats().discarded_location_results, 1);
    }

    #[test]
    fn test_filter_accepts_listed_category() {
        let mut engine = engine_with(&InMemoryStore::new());
        let clark = engine.categories()[2].clone();
        engine.set_filter("", clark, false);
        assert_eq!(titles(&engine), vec!["Las Vegas Springs"]);

        let all = engine.categories()[0].clone();
        engine.set_filter("", all, false);
        assert!(engine.filter().is_unfiltered());
    }

    #[test]
    fn test_view_viewport_covers_filtered_markers() {
        let mut engine = engine_with(&InMemoryStore::new());
        engine.set_filter("fort", "all", false);
        let viewport = engine.view_viewport();
        assert!((viewport.center_lat - 39.2950).abs() < 1e-9);
        assert_eq!(engine.map_style_for(&viewport), MapStyle::Detailed);
    }
}
