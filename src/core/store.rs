//! Marker Store: the canonical dataset and its location-derived fields
//!
//! Base fields (id, title, category, coordinates, attributes) are fixed at
//! load time. Only the `derived` field changes, and only through
//! [`MarkerStore::annotate_distances`] / [`MarkerStore::clear_distances`].
//! The store also owns the canonical ordering of the full dataset, which the
//! proximity sorter rearranges in place.

use crate::algorithms::geodesy::distance_and_bearing;
use crate::algorithms::projection::CoordinateValidator;
use crate::core::{Coordinates, DerivedFields, DistanceUnit, Marker, MarkerId};
use crate::validation::error::{EngineError, EngineResult};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct MarkerStore {
    markers: Vec<Marker>,
    index: HashMap<MarkerId, usize>,
}

impl MarkerStore {
    /// Build a store, rejecting duplicate ids and out-of-range coordinates
    pub fn new(markers: Vec<Marker>) -> EngineResult<Self> {
        let mut index = HashMap::with_capacity(markers.len());

        for (position, marker) in markers.iter().enumerate() {
            CoordinateValidator::validate_wgs84(&marker.coordinates).map_err(|reason| {
                EngineError::InvalidCoordinates {
                    id: marker.id.clone(),
                    reason: reason.to_string(),
                }
            })?;

            if index.insert(marker.id.clone(), position).is_some() {
                return Err(EngineError::DuplicateId { id: marker.id.clone() });
            }
        }

        Ok(Self { markers, index })
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// All markers in canonical order
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn lookup(&self, id: &MarkerId) -> EngineResult<&Marker> {
        self.index
            .get(id)
            .map(|&position| &self.markers[position])
            .ok_or_else(|| EngineError::NotFound { id: id.clone() })
    }

    pub fn contains(&self, id: &MarkerId) -> bool {
        self.index.contains_key(id)
    }

    /// Recompute distance and bearing from `reference` for every marker
    pub fn annotate_distances(&mut self, reference: Coordinates, unit: DistanceUnit) {
        for marker in &mut self.markers {
            let vector = distance_and_bearing(reference, marker.coordinates, unit);
            marker.derived = Some(DerivedFields {
                distance: vector.distance,
                bearing_degrees: vector.bearing_degrees,
                compass: vector.compass,
            });
        }
    }

    /// Drop derived fields once no location fix is available
    pub fn clear_distances(&mut self) {
        for marker in &mut self.markers {
            marker.derived = None;
        }
    }

    /// Reorder the dataset; the id index follows
    pub(crate) fn reorder_with<F>(&mut self, reorder: F)
    where
        F: FnOnce(&mut [Marker]),
    {
        reorder(&mut self.markers);
        self.reindex();
    }

    fn reindex(&mut self) {
        self.index.clear();
        for (position, marker) in self.markers.iter().enumerate() {
            self.index.insert(marker.id.clone(), position);
        }
    }

    /// Sorted, de-duplicated category values
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = self.markers.iter().map(|m| m.category.clone()).collect();
        categories.sort();
        categories.dedup();
        categories
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::geodesy::CompassPoint;

    fn sample() -> Vec<Marker> {
        vec![
            Marker::new("1", "Fort Churchill", "Lyon", Coordinates::new(-119.2669, 39.2950)),
            Marker::new("2", "City Hall", "Carson City", Coordinates::new(-119.7674, 39.1638)),
            Marker::new("3", "Las Vegas Mormon Fort", "Clark", Coordinates::new(-115.1398, 36.1699)),
        ]
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut markers = sample();
        markers.push(Marker::new("2", "Another", "Lyon", Coordinates::new(-119.0, 39.0)));

        match MarkerStore::new(markers) {
            Err(EngineError::DuplicateId { id }) => assert_eq!(id.as_str(), "2"),
            other => panic!("expected duplicate id error, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_coordinates_rejected() {
        let markers = vec![Marker::new("x", "Nowhere", "Lyon", Coordinates::new(-119.0, 95.0))];
        assert!(matches!(
            MarkerStore::new(markers),
            Err(EngineError::InvalidCoordinates { .. })
        ));
    }

    #[test]
    fn test_lookup() {
        let store = MarkerStore::new(sample()).unwrap();
        assert_eq!(store.lookup(&MarkerId::new("1")).unwrap().title, "Fort Churchill");
        assert!(matches!(
            store.lookup(&MarkerId::new("missing")),
            Err(EngineError::NotFound { .. })
        ));
    }

    #[test]
    fn test_annotate_is_repeatable() {
        let mut store = MarkerStore::new(sample()).unwrap();
        let reno = Coordinates::new(-119.7674, 39.5296);

        store.annotate_distances(reno, DistanceUnit::Kilometers);
        let first: Vec<_> = store.markers().iter().map(|m| m.derived).collect();
        store.annotate_distances(reno, DistanceUnit::Kilometers);
        let second: Vec<_> = store.markers().iter().map(|m| m.derived).collect();
        assert_eq!(first, second);

        let vegas = store.lookup(&MarkerId::new("3")).unwrap();
        assert_eq!(vegas.compass(), Some(CompassPoint::SE));

        store.clear_distances();
        assert!(store.markers().iter().all(|m| m.derived.is_none()));
    }

    #[test]
    fn test_reorder_keeps_lookup_consistent() {
        let mut store = MarkerStore::new(sample()).unwrap();
        store.reorder_with(|markers| markers.reverse());

        assert_eq!(store.markers()[0].id.as_str(), "3");
        assert_eq!(store.lookup(&MarkerId::new("3")).unwrap().title, "Las Vegas Mormon Fort");
    }

    #[test]
    fn test_categories_sorted_unique() {
        let mut markers = sample();
        markers.push(Marker::new("4", "Dayton", "Lyon", Coordinates::new(-119.59, 39.24)));
        let store = MarkerStore::new(markers).unwrap();
        assert_eq!(store.categories(), vec!["Carson City", "Clark", "Lyon"]);
    }
}
