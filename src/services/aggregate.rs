//! Upcoming-show counts for listing and search pages.
//!
//! Counts go through [`classify`], the same comparison the detail pages use
//! via [`partition`](super::partition::partition), so a listing never
//! disagrees with the detail page rendered at the same reference time.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::partition::{classify, Scheduled, Timing};
use crate::db::entities::{shows, venues};
use crate::db::repositories::Area;

/// Id, name and upcoming-show count of a venue or artist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySummary {
    pub id: i32,
    pub name: String,
    pub num_upcoming_shows: usize,
}

/// Venues sharing one (city, state) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaSummary {
    pub city: String,
    pub state: String,
    pub venues: Vec<EntitySummary>,
}

pub fn count_upcoming<T: Scheduled>(shows: &[T], reference_time: DateTime<Utc>) -> usize {
    shows
        .iter()
        .filter(|show| classify(show.start_time(), reference_time) == Timing::Upcoming)
        .count()
}

/// Upcoming counts keyed by venue or artist id. Ids without upcoming shows
/// are absent; read them with [`count_for`].
pub fn upcoming_counts(
    shows: &[shows::Model],
    key: impl Fn(&shows::Model) -> i32,
    reference_time: DateTime<Utc>,
) -> HashMap<i32, usize> {
    let mut counts = HashMap::new();
    for show in shows {
        if classify(show.start_time(), reference_time) == Timing::Upcoming {
            *counts.entry(key(show)).or_insert(0) += 1;
        }
    }
    counts
}

pub fn count_for(counts: &HashMap<i32, usize>, id: i32) -> usize {
    counts.get(&id).copied().unwrap_or(0)
}

/// Groups venues under their (city, state) pair, keeping the order of
/// `areas` and the store order of venues inside each area.
pub fn group_by_area(
    areas: &[Area],
    venues: &[venues::Model],
    counts: &HashMap<i32, usize>,
) -> Vec<AreaSummary> {
    areas
        .iter()
        .filter_map(|area| {
            let members: Vec<EntitySummary> = venues
                .iter()
                .filter(|v| v.city == area.city && v.state == area.state)
                .map(|v| EntitySummary {
                    id: v.id,
                    name: v.name.clone(),
                    num_upcoming_shows: count_for(counts, v.id),
                })
                .collect();

            if members.is_empty() {
                None
            } else {
                Some(AreaSummary {
                    city: area.city.clone(),
                    state: area.state.clone(),
                    venues: members,
                })
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::join::tests::{at, show, venue};
    use crate::services::partition::partition;
    use proptest::prelude::*;

    #[test]
    fn test_count_upcoming_tomorrow_and_yesterday() {
        let now = at(0);
        let tomorrow = vec![show(1, 1, 4, 24)];
        let yesterday = vec![show(1, 1, 4, -24)];

        assert_eq!(count_upcoming(&tomorrow, now), 1);
        assert_eq!(count_upcoming(&yesterday, now), 0);
    }

    #[test]
    fn test_count_upcoming_no_shows() {
        assert_eq!(count_upcoming::<shows::Model>(&[], at(0)), 0);
    }

    #[test]
    fn test_upcoming_counts_by_venue_and_artist() {
        let shows = vec![
            show(1, 1, 4, 2),
            show(2, 1, 5, -2),
            show(3, 3, 5, 5),
            show(4, 3, 6, 6),
        ];

        let by_venue = upcoming_counts(&shows, |s| s.venue_id, at(0));
        assert_eq!(count_for(&by_venue, 1), 1);
        assert_eq!(count_for(&by_venue, 3), 2);
        assert_eq!(count_for(&by_venue, 42), 0);

        let by_artist = upcoming_counts(&shows, |s| s.artist_id, at(0));
        assert_eq!(count_for(&by_artist, 5), 1);
        assert_eq!(count_for(&by_artist, 4), 1);
    }

    #[test]
    fn test_group_by_area() {
        let mut hop = venue(1, "The Musical Hop");
        hop.city = "San Francisco".to_string();
        let mut dueling = venue(2, "The Dueling Pianos Bar");
        dueling.city = "New York".to_string();
        dueling.state = "NY".to_string();
        let park = venue(3, "Park Square Live Music & Coffee");

        let areas = vec![
            Area {
                city: "San Francisco".to_string(),
                state: "CA".to_string(),
            },
            Area {
                city: "New York".to_string(),
                state: "NY".to_string(),
            },
            Area {
                city: "Nowhere".to_string(),
                state: "NV".to_string(),
            },
        ];
        let counts = HashMap::from([(3, 3)]);

        let grouped = group_by_area(&areas, &[hop, dueling, park], &counts);

        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].city, "San Francisco");
        let names: Vec<&str> = grouped[0].venues.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["The Musical Hop", "Park Square Live Music & Coffee"]);
        assert_eq!(grouped[0].venues[1].num_upcoming_shows, 3);
        assert_eq!(grouped[0].venues[0].num_upcoming_shows, 0);
        assert_eq!(grouped[1].venues.len(), 1);
    }

    proptest! {
        #[test]
        fn prop_count_matches_partition(
            hours in prop::collection::vec(-500i64..500, 0..48),
            reference in -500i64..500,
        ) {
            let shows: Vec<shows::Model> = hours
                .iter()
                .enumerate()
                .map(|(i, h)| show(i as i32 + 1, 1, 1, *h))
                .collect();

            let reference = at(reference);
            prop_assert_eq!(
                count_upcoming(&shows, reference),
                partition(&shows, reference).upcoming.len()
            );
        }

        #[test]
        fn prop_grouped_counts_match_per_entity_partition(
            bookings in prop::collection::vec((1i32..5, -200i64..200), 0..48),
        ) {
            let shows: Vec<shows::Model> = bookings
                .iter()
                .enumerate()
                .map(|(i, (venue_id, h))| show(i as i32 + 1, *venue_id, 1, *h))
                .collect();
            let reference = at(0);
            let counts = upcoming_counts(&shows, |s| s.venue_id, reference);

            for venue_id in 1..5 {
                let own: Vec<shows::Model> = shows
                    .iter()
                    .filter(|s| s.venue_id == venue_id)
                    .cloned()
                    .collect();
                prop_assert_eq!(
                    count_for(&counts, venue_id),
                    partition(&own, reference).upcoming.len()
                );
            }
        }
    }
}
