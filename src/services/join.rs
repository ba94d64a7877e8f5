//! Pairs shows with the artist or venue on the other side of the booking.
//!
//! Lookups are passed in as maps fetched in one batch by the store. A show
//! whose counterpart is missing is a data-integrity violation and fails the
//! whole resolution; nothing is emitted for the remaining shows.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::partition::Scheduled;
use crate::db::entities::{artists, shows, venues};
use crate::error::{AppError, Result};

/// A show as seen from a venue page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtistShow {
    pub show_id: i32,
    pub start_time: DateTime<Utc>,
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
}

/// A show as seen from an artist page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VenueShow {
    pub show_id: i32,
    pub start_time: DateTime<Utc>,
    pub venue_id: i32,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
}

/// A show with both sides resolved, for the shows listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShowListing {
    pub show_id: i32,
    pub start_time: DateTime<Utc>,
    pub venue_id: i32,
    pub venue_name: String,
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
}

impl Scheduled for ArtistShow {
    fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }
}

impl Scheduled for VenueShow {
    fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }
}

impl Scheduled for ShowListing {
    fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }
}

fn lookup<'a, T>(
    by_id: &'a HashMap<i32, T>,
    show: &shows::Model,
    entity: &'static str,
    id: i32,
) -> Result<&'a T> {
    by_id.get(&id).ok_or(AppError::DanglingReference {
        show_id: show.id,
        entity,
        id,
    })
}

pub fn resolve_venue_side(
    shows: &[shows::Model],
    artists_by_id: &HashMap<i32, artists::Model>,
) -> Result<Vec<ArtistShow>> {
    shows
        .iter()
        .map(|show| -> Result<ArtistShow> {
            let artist = lookup(artists_by_id, show, "artist", show.artist_id)?;
            Ok(ArtistShow {
                show_id: show.id,
                start_time: show.start_time(),
                artist_id: artist.id,
                artist_name: artist.name.clone(),
                artist_image_link: artist.image_link.clone(),
            })
        })
        .collect()
}

pub fn resolve_artist_side(
    shows: &[shows::Model],
    venues_by_id: &HashMap<i32, venues::Model>,
) -> Result<Vec<VenueShow>> {
    shows
        .iter()
        .map(|show| -> Result<VenueShow> {
            let venue = lookup(venues_by_id, show, "venue", show.venue_id)?;
            Ok(VenueShow {
                show_id: show.id,
                start_time: show.start_time(),
                venue_id: venue.id,
                venue_name: venue.name.clone(),
                venue_image_link: venue.image_link.clone(),
            })
        })
        .collect()
}

pub fn resolve_listing(
    shows: &[shows::Model],
    venues_by_id: &HashMap<i32, venues::Model>,
    artists_by_id: &HashMap<i32, artists::Model>,
) -> Result<Vec<ShowListing>> {
    shows
        .iter()
        .map(|show| -> Result<ShowListing> {
            let venue = lookup(venues_by_id, show, "venue", show.venue_id)?;
            let artist = lookup(artists_by_id, show, "artist", show.artist_id)?;
            Ok(ShowListing {
                show_id: show.id,
                start_time: show.start_time(),
                venue_id: venue.id,
                venue_name: venue.name.clone(),
                artist_id: artist.id,
                artist_name: artist.name.clone(),
                artist_image_link: artist.image_link.clone(),
            })
        })
        .collect()
}

/// Distinct ids referenced on one side of `shows`, for batch lookups.
pub fn referenced_ids(shows: &[shows::Model], pick: impl Fn(&shows::Model) -> i32) -> Vec<i32> {
    let mut ids: Vec<i32> = shows.iter().map(pick).collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}
