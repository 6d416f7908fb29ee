//! Filter Engine: search text, category and favorites predicates
//!
//! [`apply`] is a pure, order-preserving pass. The three predicates are
//! ANDed, so re-applying a filter to its own output changes nothing.

use crate::core::constants::ALL_CATEGORIES;
use crate::core::{Marker, MarkerId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Which categories pass the filter
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategorySelector {
    #[default]
    All,
    /// Exact match on the marker category
    Only(String),
}

impl CategorySelector {
    pub fn matches(&self, category: &str) -> bool {
        match self {
            CategorySelector::All => true,
            CategorySelector::Only(selected) => selected == category,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CategorySelector::All => ALL_CATEGORIES,
            CategorySelector::Only(selected) => selected,
        }
    }
}

impl From<&str> for CategorySelector {
    fn from(value: &str) -> Self {
        if value == ALL_CATEGORIES {
            CategorySelector::All
        } else {
            CategorySelector::Only(value.to_string())
        }
    }
}

impl From<String> for CategorySelector {
    fn from(value: String) -> Self {
        if value == ALL_CATEGORIES {
            CategorySelector::All
        } else {
            CategorySelector::Only(value)
        }
    }
}

/// User-selected filter; the default filters nothing
///
/// Persists as `{"search": "...", "favorites": "all"|"favorites", "county": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "StoredFilter", into = "StoredFilter")]
pub struct Filter {
    pub search_text: String,
    pub category: CategorySelector,
    pub favorites_only: bool,
}

impl Filter {
    pub fn new(search_text: impl Into<String>, category: impl Into<CategorySelector>, favorites_only: bool) -> Self {
        Self {
            search_text: search_text.into(),
            category: category.into(),
            favorites_only,
        }
    }

    pub fn is_unfiltered(&self) -> bool {
        *self == Filter::default()
    }
}

#[derive(Serialize, Deserialize)]
struct StoredFilter {
    #[serde(default)]
    search: String,
    #[serde(default = "all_value")]
    favorites: String,
    #[serde(default = "all_value")]
    county: String,
}

fn all_value() -> String {
    ALL_CATEGORIES.to_string()
}

impl From<StoredFilter> for Filter {
    fn from(stored: StoredFilter) -> Self {
        Filter {
            search_text: stored.search,
            category: CategorySelector::from(stored.county.as_str()),
            favorites_only: stored.favorites == "favorites",
        }
    }
}

impl From<Filter> for StoredFilter {
    fn from(filter: Filter) -> Self {
        StoredFilter {
            search: filter.search_text,
            favorites: if filter.favorites_only { "favorites" } else { ALL_CATEGORIES }.to_string(),
            county: filter.category.as_str().to_string(),
        }
    }
}

/// Favorite marker ids; order-insensitive, persisted as a JSON array
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FavoritesSet(BTreeSet<MarkerId>);

impl FavoritesSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &MarkerId) -> bool {
        self.0.contains(id)
    }

    /// Flip membership; returns whether `id` is now a favorite
    pub fn toggle(&mut self, id: &MarkerId) -> bool {
        if self.0.remove(id) {
            false
        } else {
            self.0.insert(id.clone());
            true
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MarkerId> {
        self.0.iter()
    }
}

impl FromIterator<MarkerId> for FavoritesSet {
    fn from_iter<I: IntoIterator<Item = MarkerId>>(iter: I) -> Self {
        FavoritesSet(iter.into_iter().collect())
    }
}

/// Whether a single marker passes all three predicates
pub fn matches(filter: &Filter, favorites: &FavoritesSet, marker: &Marker) -> bool {
    if filter.favorites_only && !favorites.contains(&marker.id) {
        return false;
    }

    if !filter.category.matches(&marker.category) {
        return false;
    }

    filter.search_text.is_empty()
        || marker
            .title
            .to_uppercase()
            .contains(&filter.search_text.to_uppercase())
}

/// Markers passing the filter, in input order
pub fn apply<'a, I>(filter: &Filter, favorites: &FavoritesSet, markers: I) -> Vec<&'a Marker>
where
    I: IntoIterator<Item = &'a Marker>,
{
    markers
        .into_iter()
        .filter(|marker| matches(filter, favorites, marker))
        .collect()
}

/// Positions of passing markers within `markers`
pub fn apply_indices(filter: &Filter, favorites: &FavoritesSet, markers: &[Marker]) -> Vec<usize> {
    markers
        .iter()
        .enumerate()
        .filter(|(_, marker)| matches(filter, favorites, marker))
        .map(|(position, _)| position)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Coordinates;

    fn dataset() -> Vec<Marker> {
        vec![
            Marker::new("fc", "Fort Churchill", "Lyon", Coordinates::new(-119.27, 39.29)),
            Marker::new("ch", "City Hall", "Carson City", Coordinates::new(-119.77, 39.16)),
            Marker::new("lv", "Las Vegas Fort", "Clark", Coordinates::new(-115.14, 36.17)),
            Marker::new("dy", "Dayton", "Lyon County", Coordinates::new(-119.59, 39.24)),
        ]
    }

    fn ids(markers: &[&Marker]) -> Vec<String> {
        markers.iter().map(|m| m.id.to_string()).collect()
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let data = dataset();
        let favorites = FavoritesSet::new();

        let filter = Filter::new("fort", "all", false);
        assert_eq!(ids(&apply(&filter, &favorites, &data)), vec!["fc", "lv"]);

        let two = vec![data[0].clone(), data[1].clone()];
        assert_eq!(ids(&apply(&filter, &favorites, &two)), vec!["fc"]);
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let data = dataset();
        let result = apply(&Filter::default(), &FavoritesSet::new(), &data);
        assert_eq!(result.len(), data.len());
    }

    #[test]
    fn test_category_is_exact_match() {
        let data = dataset();
        let filter = Filter::new("", "Lyon", false);
        // "Lyon County" must not match "Lyon"
        assert_eq!(ids(&apply(&filter, &FavoritesSet::new(), &data)), vec!["fc"]);
    }

    #[test]
    fn test_selector_from_owned_category() {
        assert_eq!(CategorySelector::from(String::from("all")), CategorySelector::All);
        assert_eq!(
            CategorySelector::from(String::from("Lyon")),
            CategorySelector::Only("Lyon".to_string())
        );
        assert_eq!(Filter::new("", String::from("Lyon"), false), Filter::new("", "Lyon", false));
    }

    #[test]
    fn test_favorites_only() {
        let data = dataset();
        let mut favorites = FavoritesSet::new();
        favorites.toggle(&MarkerId::new("lv"));
        favorites.toggle(&MarkerId::new("ch"));

        let filter = Filter::new("", "all", true);
        assert_eq!(ids(&apply(&filter, &favorites, &data)), vec!["ch", "lv"]);

        let filter = Filter::new("", "all", false);
        assert_eq!(apply(&filter, &favorites, &data).len(), 4);
    }

    #[test]
    fn test_predicates_are_anded() {
        let data = dataset();
        let favorites: FavoritesSet = vec![MarkerId::new("fc"), MarkerId::new("lv")].into_iter().collect();
        let filter = Filter::new("FORT", "Clark", true);
        assert_eq!(ids(&apply(&filter, &favorites, &data)), vec!["lv"]);
    }

    #[test]
    fn test_apply_is_idempotent() {
        let data = dataset();
        let favorites: FavoritesSet = vec![MarkerId::new("fc"), MarkerId::new("dy")].into_iter().collect();
        let filters = [
            Filter::new("o", "all", false),
            Filter::new("", "Lyon", true),
            Filter::new("xyz", "all", false),
            Filter::default(),
        ];

        for filter in &filters {
            let once = apply(filter, &favorites, &data);
            let twice = apply(filter, &favorites, once.iter().copied());
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_apply_indices_matches_apply() {
        let data = dataset();
        let filter = Filter::new("a", "all", false);
        let favorites = FavoritesSet::new();
        let by_index: Vec<&Marker> = apply_indices(&filter, &favorites, &data)
            .into_iter()
            .map(|i| &data[i])
            .collect();
        assert_eq!(by_index, apply(&filter, &favorites, &data));
    }

    #[test]
    fn test_toggle_favorite() {
        let mut favorites = FavoritesSet::new();
        let id = MarkerId::new("fc");
        assert!(favorites.toggle(&id));
        assert!(favorites.contains(&id));
        assert!(!favorites.toggle(&id));
        assert!(favorites.is_empty());
    }

    #[test]
    fn test_persisted_filter_format() {
        let filter = Filter::new("fort", "Lyon", true);
        let json = serde_json::to_value(&filter).unwrap();
        assert_eq!(json, serde_json::json!({"search": "fort", "favorites": "favorites", "county": "Lyon"}));

        let parsed: Filter = serde_json::from_str(r#"{"search": "", "favorites": "all", "county": "all"}"#).unwrap();
        assert!(parsed.is_unfiltered());

        let partial: Filter = serde_json::from_str(r#"{"search": "hall"}"#).unwrap();
        assert_eq!(partial, Filter::new("hall", "all", false));
    }

    #[test]
    fn test_favorites_serialize_as_array() {
        let favorites: FavoritesSet = vec![MarkerId::new("b"), MarkerId::new("a")].into_iter().collect();
        assert_eq!(serde_json::to_string(&favorites).unwrap(), r#"["a","b"]"#);
        let parsed: FavoritesSet = serde_json::from_str(r#"["b","a","a"]"#).unwrap();
        assert_eq!(parsed, favorites);
    }
}
