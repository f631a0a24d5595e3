//! Search, filter and sort over the event catalogue.
//!
//! Every function here is pure: the same catalogue, query and category always give the
//! same result, and the source slice is never modified.

use crate::types::Event;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel selector meaning "every category".
pub const ALL_CATEGORIES: &str = "todos";

/// Category selector
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CategoryFilter {
    /// No category restriction
    #[default]
    All,
    /// Only events whose label equals this one, ignoring case
    Label(String),
}

impl CategoryFilter {
    /// Parse a selector; `"todos"` and the empty string select everything
    ///
    /// Any other value, `"All"` included, is a category label.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        if raw.is_empty() || raw.eq_ignore_ascii_case(ALL_CATEGORIES) {
            Self::All
        } else {
            Self::Label(raw.to_string())
        }
    }

    /// Whether `event` passes this selector
    #[must_use]
    pub fn matches(&self, event: &Event) -> bool {
        match self {
            Self::All => true,
            Self::Label(label) => event.category.label().to_lowercase() == label.to_lowercase(),
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL_CATEGORIES),
            Self::Label(label) => f.write_str(label),
        }
    }
}

impl From<String> for CategoryFilter {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<CategoryFilter> for String {
    fn from(filter: CategoryFilter) -> Self {
        filter.to_string()
    }
}

/// Whether the lower-cased `needle` occurs in any searchable field of `event`
fn matches_text(event: &Event, needle: &str) -> bool {
    [
        event.name.as_str(),
        event.description.as_str(),
        event.venue.as_str(),
        event.location.as_str(),
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(needle))
}

/// Filter the catalogue by free-text query and category, sorted by date
///
/// An empty query matches everything. The query is not trimmed: `" "` only matches
/// events containing a space.
#[must_use]
pub fn filter_events(events: &[Event], query: &str, category: &CategoryFilter) -> Vec<Event> {
    let needle = query.to_lowercase();
    let filtered = events
        .iter()
        .filter(|event| needle.is_empty() || matches_text(event, &needle))
        .filter(|event| category.matches(event))
        .cloned()
        .collect();
    sort_by_date(filtered)
}

/// Sort ascending by date; equal dates keep their relative order
#[must_use]
pub fn sort_by_date(mut events: Vec<Event>) -> Vec<Event> {
    events.sort_by_key(|event| event.date);
    events
}

/// Distinct category labels in first-seen order
#[must_use]
pub fn categories(events: &[Event]) -> Vec<String> {
    let mut labels: Vec<String> = Vec::new();
    for event in events {
        let label = event.category.label();
        if !labels.iter().any(|seen| seen == label) {
            labels.push(label.to_string());
        }
    }
    labels
}

/// The headline event: the earliest one, first in catalogue order on ties
#[must_use]
pub fn featured(events: &[Event]) -> Option<&Event> {
    events.iter().min_by_key(|event| event.date)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)] // Test code

    use super::*;
    use crate::types::{Category, EventDate, EventId, Price};
    use chrono::{TimeZone, Utc};
    use proptest::prelude::*;

    fn event(id: &str, name: &str, description: &str, category: &str, day: u32) -> Event {
        Event {
            id: EventId::new(id),
            name: name.to_string(),
            description: description.to_string(),
            category: Category::new(category),
            date: EventDate::new(Utc.with_ymd_and_hms(2025, 1, day, 20, 0, 0).unwrap()),
            time: None,
            venue: format!("Venue {id}"),
            location: "Madrid".to_string(),
            price: Price::from_cents(1000),
            image: None,
            long_description: None,
            lineup: None,
            schedule: None,
        }
    }

    fn catalogue() -> Vec<Event> {
        vec![
            event("1", "Rock Night", "Loud guitars", "Music", 5),
            event("2", "Late Show", "Smooth Jazz quartet", "Music", 2),
            event("3", "Derby", "Football derby", "Sports", 3),
            event("4", "Opera Gala", "Classical voices", "Theatre", 1),
            event("5", "Quiz", "Pub quiz with jAzZ breaks", "Other", 4),
        ]
    }

    fn ids(events: &[Event]) -> Vec<&str> {
        events.iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn test_empty_query_and_all_categories_returns_everything_by_date() {
        let result = filter_events(&catalogue(), "", &CategoryFilter::All);
        assert_eq!(ids(&result), vec!["4", "2", "3", "5", "1"]);
    }

    #[test]
    fn test_query_matches_description_case_insensitively() {
        let result = filter_events(&catalogue(), "jazz", &CategoryFilter::All);
        assert_eq!(ids(&result), vec!["2", "5"]);
    }

    #[test]
    fn test_query_matches_venue_and_location() {
        assert_eq!(ids(&filter_events(&catalogue(), "venue 3", &CategoryFilter::All)), vec!["3"]);
        assert_eq!(filter_events(&catalogue(), "MADRID", &CategoryFilter::All).len(), 5);
    }

    #[test]
    fn test_category_is_compared_case_insensitively() {
        let result = filter_events(&catalogue(), "", &CategoryFilter::parse("music"));
        assert_eq!(ids(&result), vec!["2", "1"]);
    }

    #[test]
    fn test_query_and_category_combine() {
        let result = filter_events(&catalogue(), "jazz", &CategoryFilter::parse("Other"));
        assert_eq!(ids(&result), vec!["5"]);
    }

    #[test]
    fn test_no_match_is_empty_not_error() {
        assert!(filter_events(&catalogue(), "ballet", &CategoryFilter::All).is_empty());
    }

    #[test]
    fn test_whitespace_query_is_not_trimmed() {
        let result = filter_events(&catalogue(), "   ", &CategoryFilter::All);
        assert!(result.is_empty());
    }

    #[test]
    fn test_sentinels_select_all() {
        assert_eq!(CategoryFilter::parse("todos"), CategoryFilter::All);
        assert_eq!(CategoryFilter::parse("TODOS"), CategoryFilter::All);
        assert_eq!(CategoryFilter::parse(""), CategoryFilter::All);
        assert_eq!(CategoryFilter::All.to_string(), "todos");
    }

    #[test]
    fn test_category_labelled_all_is_selectable() {
        let mut events = catalogue();
        events.push(event("6", "Mixed Bill", "A bit of everything", "All", 6));

        let filter = CategoryFilter::parse("all");
        assert_eq!(filter, CategoryFilter::Label("all".to_string()));
        assert_eq!(ids(&filter_events(&events, "", &filter)), vec!["6"]);
    }

    #[test]
    fn test_categories_are_deduplicated_in_order() {
        assert_eq!(categories(&catalogue()), vec!["Music", "Sports", "Theatre", "Other"]);
    }

    #[test]
    fn test_featured_is_earliest_event() {
        assert_eq!(featured(&catalogue()).map(|e| e.id.as_str()), Some("4"));
        assert!(featured(&[]).is_none());
    }

    #[test]
    fn test_sort_is_stable_for_equal_dates() {
        let events = vec![
            event("b", "B", "", "X", 2),
            event("a", "A", "", "X", 1),
            event("c", "C", "", "X", 2),
        ];
        assert_eq!(ids(&sort_by_date(events)), vec!["a", "b", "c"]);
    }

    fn arb_catalogue() -> impl Strategy<Value = Vec<Event>> {
        prop::collection::vec(
            ("[a-zA-Z ]{0,12}", "[a-zA-Z ]{0,12}", prop::sample::select(vec!["Music", "Sports", "Theatre"]), 1_u32..28),
            0..20,
        )
        .prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (name, description, category, day))| {
                    event(&i.to_string(), &name, &description, category, day)
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn test_text_filter_is_exact_subset(events in arb_catalogue(), query in "[a-zA-Z]{1,3}") {
            let result = filter_events(&events, &query, &CategoryFilter::All);
            let needle = query.to_lowercase();
            let expected = events
                .iter()
                .filter(|e| {
                    e.name.to_lowercase().contains(&needle)
                        || e.description.to_lowercase().contains(&needle)
                        || e.venue.to_lowercase().contains(&needle)
                        || e.location.to_lowercase().contains(&needle)
                })
                .count();
            prop_assert_eq!(result.len(), expected);
            prop_assert!(result.iter().all(|e| matches_text(e, &needle)));
        }

        #[test]
        fn test_category_filter_is_exact_subset(events in arb_catalogue(), label in prop::sample::select(vec!["music", "SPORTS", "Theatre"])) {
            let result = filter_events(&events, "", &CategoryFilter::parse(label));
            let expected = events
                .iter()
                .filter(|e| e.category.label().eq_ignore_ascii_case(label))
                .count();
            prop_assert_eq!(result.len(), expected);
        }

        #[test]
        fn test_sorting_is_idempotent(events in arb_catalogue()) {
            let once = sort_by_date(events);
            let twice = sort_by_date(once.clone());
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn test_filtering_is_deterministic(events in arb_catalogue(), query in "[a-z]{0,2}") {
            let first = filter_events(&events, &query, &CategoryFilter::All);
            let second = filter_events(&events, &query, &CategoryFilter::All);
            prop_assert_eq!(first, second);
        }
    }
}
