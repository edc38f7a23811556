//! Itinerary generation
//!
//! Turns "N days, these kinds of tourism" into a day-by-day schedule. The
//! algorithm is a single-pass greedy partition of the catalog's
//! priority-ordered place list: no travel-distance optimization, no duration
//! balancing beyond a fixed per-day place count. Predictable over clever.

use eyre::Result;
use serde::{Deserialize, Serialize};

use placestore::Place;

/// Smallest accepted trip length in days
pub const MIN_DAYS: u32 = 1;
/// Largest accepted trip length in days
pub const MAX_DAYS: u32 = 14;
/// Every populated day gets at least this many places
pub const MIN_PLACES_PER_DAY: usize = 2;

/// Read-only catalog capability the generator depends on.
///
/// Implementations must return active places belonging to the given
/// categories, ordered by ascending priority with a stable tie order.
pub trait PlaceCatalog {
    fn active_places(&self, categories: &[i64]) -> Result<Vec<Place>>;
}

impl PlaceCatalog for placestore::PlaceStore {
    fn active_places(&self, categories: &[i64]) -> Result<Vec<Place>> {
        Ok(self.active_places_in_categories(categories)?)
    }
}

/// A validated itinerary request.
///
/// Construction goes through [`crate::forms::PlannerForm`]; the generator
/// assumes `days` is within 1..=14 and `categories` is non-empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItineraryRequest {
    pub days: u32,
    pub categories: Vec<i64>,
}

/// One populated day of a generated itinerary
#[derive(Debug, Clone, Serialize)]
pub struct ItineraryDay {
    /// 1-based day number within the requested span
    pub day_number: u32,
    /// Places to visit that day, in catalog priority order
    pub places: Vec<Place>,
    /// Sum of the places' suggested durations, in hours
    pub total_duration: u32,
}

/// A generated multi-day schedule. Only days that received at least one
/// place appear in `schedule`.
#[derive(Debug, Clone, Serialize)]
pub struct Itinerary {
    /// Requested trip length (may exceed the populated day count)
    pub days: u32,
    /// Requested category ids
    pub categories: Vec<i64>,
    pub schedule: Vec<ItineraryDay>,
}

impl Itinerary {
    /// Number of places scheduled across all days
    pub fn total_places(&self) -> usize {
        self.schedule.iter().map(|day| day.places.len()).sum()
    }

    /// True when no catalog place matched the request
    pub fn is_empty(&self) -> bool {
        self.schedule.is_empty()
    }
}

/// Per-day place count for a candidate list of `total` places.
///
/// Integer division means a non-divisible `total` leaves a remainder that is
/// either dropped (when every requested day fills up) or lands on the last
/// populated day. Kept exactly as the site always behaved.
pub fn places_per_day(total: usize, days: u32) -> usize {
    MIN_PLACES_PER_DAY.max(total / days as usize)
}

/// Generate an itinerary for a validated request.
///
/// Pure apart from the catalog read: same catalog state and request always
/// produce the same schedule. An empty catalog result is a valid outcome
/// (empty schedule), not an error.
pub fn generate(catalog: &impl PlaceCatalog, request: &ItineraryRequest) -> Result<Itinerary> {
    let places = catalog.active_places(&request.categories)?;
    let per_day = places_per_day(places.len(), request.days);

    let mut schedule = Vec::new();
    for day_number in 1..=request.days {
        let start = (day_number as usize - 1) * per_day;
        if start >= places.len() {
            break;
        }
        let end = (start + per_day).min(places.len());
        let day_places = places[start..end].to_vec();
        let total_duration = day_places.iter().map(|p| p.suggested_duration.hours()).sum();
        schedule.push(ItineraryDay {
            day_number,
            places: day_places,
            total_duration,
        });
    }

    Ok(Itinerary {
        days: request.days,
        categories: request.categories.clone(),
        schedule,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use placestore::Duration;
    use proptest::prelude::*;

    /// In-memory catalog: returns its places filtered by category, ordered
    /// by (priority, id) like the real store.
    struct StubCatalog {
        places: Vec<Place>,
    }

    impl PlaceCatalog for StubCatalog {
        fn active_places(&self, categories: &[i64]) -> Result<Vec<Place>> {
            let mut places: Vec<Place> = self
                .places
                .iter()
                .filter(|p| p.is_active && categories.contains(&p.category_id))
                .cloned()
                .collect();
            places.sort_by_key(|p| (p.priority, p.id));
            Ok(places)
        }
    }

    fn make_place(id: i64, category_id: i64, priority: u8, duration: Duration) -> Place {
        let mut place = Place::new(
            format!("مكان {}", id),
            format!("Place {}", id),
            category_id,
            1,
        )
        .with_priority(priority)
        .with_duration(duration);
        place.id = id;
        place
    }

    fn catalog_of(n: usize) -> StubCatalog {
        let places = (1..=n as i64)
            .map(|id| make_place(id, 1, ((id - 1) % 10 + 1) as u8, Duration::ThreeHours))
            .collect();
        StubCatalog { places }
    }

    fn request(days: u32) -> ItineraryRequest {
        ItineraryRequest {
            days,
            categories: vec![1],
        }
    }

    #[test]
    fn test_places_per_day_formula() {
        assert_eq!(places_per_day(10, 3), 3);
        assert_eq!(places_per_day(3, 5), 2);
        assert_eq!(places_per_day(6, 3), 2);
        assert_eq!(places_per_day(0, 7), 2);
        assert_eq!(places_per_day(100, 14), 7);
        // Never below the floor of 2, even for tiny catalogs
        assert_eq!(places_per_day(1, 1), 2);
    }

    #[test]
    fn test_ten_places_three_days_drops_remainder() {
        // places_per_day = max(2, 10/3) = 3; days 1-3 take 9 places and the
        // tenth place never gets a day.
        let itinerary = generate(&catalog_of(10), &request(3)).unwrap();

        assert_eq!(itinerary.schedule.len(), 3);
        assert_eq!(itinerary.total_places(), 9);
        for day in &itinerary.schedule {
            assert_eq!(day.places.len(), 3);
        }
    }

    #[test]
    fn test_three_places_five_days_truncates_tail() {
        // places_per_day = max(2, 0) = 2; day 1 gets two places, day 2 gets
        // the remainder, days 3-5 stay empty and are omitted.
        let itinerary = generate(&catalog_of(3), &request(5)).unwrap();

        assert_eq!(itinerary.days, 5);
        assert_eq!(itinerary.schedule.len(), 2);
        assert_eq!(itinerary.schedule[0].places.len(), 2);
        assert_eq!(itinerary.schedule[1].places.len(), 1);
    }

    #[test]
    fn test_empty_catalog_yields_empty_schedule() {
        let itinerary = generate(&catalog_of(0), &request(4)).unwrap();
        assert!(itinerary.is_empty());
        assert_eq!(itinerary.days, 4);
    }

    #[test]
    fn test_six_places_three_days_even_split() {
        let itinerary = generate(&catalog_of(6), &request(3)).unwrap();

        assert_eq!(itinerary.schedule.len(), 3);
        assert_eq!(itinerary.total_places(), 6);
        for (i, day) in itinerary.schedule.iter().enumerate() {
            assert_eq!(day.day_number, i as u32 + 1);
            assert_eq!(day.places.len(), 2);
        }
    }

    #[test]
    fn test_day_durations_are_summed() {
        let places = vec![
            make_place(1, 1, 1, Duration::FourHours),
            make_place(2, 1, 2, Duration::OneHour),
            make_place(3, 1, 3, Duration::HalfDay),
            make_place(4, 1, 4, Duration::TwoHours),
        ];
        let itinerary = generate(&StubCatalog { places }, &request(2)).unwrap();

        assert_eq!(itinerary.schedule.len(), 2);
        assert_eq!(itinerary.schedule[0].total_duration, 4 + 1);
        assert_eq!(itinerary.schedule[1].total_duration, 6 + 2);
    }

    #[test]
    fn test_places_follow_catalog_priority_order() {
        let places = vec![
            make_place(1, 1, 9, Duration::OneHour),
            make_place(2, 1, 1, Duration::OneHour),
            make_place(3, 1, 5, Duration::OneHour),
            make_place(4, 1, 2, Duration::OneHour),
        ];
        let itinerary = generate(&StubCatalog { places }, &request(2)).unwrap();

        let scheduled: Vec<i64> = itinerary
            .schedule
            .iter()
            .flat_map(|d| d.places.iter().map(|p| p.id))
            .collect();
        assert_eq!(scheduled, vec![2, 4, 3, 1]);
    }

    #[test]
    fn test_only_requested_categories_selected() {
        let mut places = vec![
            make_place(1, 1, 1, Duration::OneHour),
            make_place(2, 2, 1, Duration::OneHour),
            make_place(3, 3, 1, Duration::OneHour),
            make_place(4, 2, 2, Duration::OneHour),
        ];
        // Inactive places never appear, whatever the category
        places.push({
            let mut p = make_place(5, 1, 1, Duration::OneHour);
            p.is_active = false;
            p
        });

        let itinerary = generate(
            &StubCatalog { places },
            &ItineraryRequest {
                days: 1,
                categories: vec![1, 2],
            },
        )
        .unwrap();

        let scheduled: Vec<i64> = itinerary
            .schedule
            .iter()
            .flat_map(|d| d.places.iter().map(|p| p.id))
            .collect();
        assert_eq!(scheduled, vec![1, 2]);
    }

    proptest! {
        /// The partition invariants hold for any catalog size and trip length:
        /// no duplicates, schedule is a prefix of the catalog order, day
        /// numbers strictly increase and never exceed the request, and every
        /// populated day except the last holds exactly places_per_day places.
        #[test]
        fn prop_partition_invariants(n in 0usize..60, days in 1u32..=14) {
            let itinerary = generate(&catalog_of(n), &request(days)).unwrap();
            let per_day = places_per_day(n, days);

            let scheduled: Vec<i64> = itinerary
                .schedule
                .iter()
                .flat_map(|d| d.places.iter().map(|p| p.id))
                .collect();

            // No place twice, and the schedule is a contiguous prefix of the
            // catalog result (only trailing places may be cut off)
            let expected_count = n.min(days as usize * per_day);
            prop_assert_eq!(scheduled.len(), expected_count);
            let catalog_order: Vec<i64> = catalog_of(n).active_places(&[1]).unwrap()
                .iter().map(|p| p.id).collect();
            prop_assert_eq!(&scheduled[..], &catalog_order[..expected_count]);

            // Day numbers strictly increasing, capped by the request
            let numbers: Vec<u32> = itinerary.schedule.iter().map(|d| d.day_number).collect();
            prop_assert!(numbers.windows(2).all(|w| w[0] < w[1]));
            prop_assert!(numbers.iter().all(|&d| d >= 1 && d <= days));

            // Bucket sizes: full buckets everywhere except possibly the last
            for (i, day) in itinerary.schedule.iter().enumerate() {
                prop_assert!(!day.places.is_empty());
                if i + 1 < itinerary.schedule.len() {
                    prop_assert_eq!(day.places.len(), per_day);
                } else {
                    prop_assert!(day.places.len() <= per_day);
                }
                let total: u32 = day.places.iter().map(|p| p.suggested_duration.hours()).sum();
                prop_assert_eq!(day.total_duration, total);
            }
        }
    }
}
