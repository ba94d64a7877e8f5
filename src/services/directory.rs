//! Page-level queries: fetch from the store, then join, partition and count.

use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;
use serde::Serialize;

use super::aggregate::{self, AreaSummary, EntitySummary};
use super::join::{self, ArtistShow, ShowListing, VenueShow};
use super::partition::partition;
use super::search::{self, SearchResults};
use crate::db::entities::{artists, venues};
use crate::db::repositories::{
    ArtistRepository, ShowOwner, ShowRepository, VenueFilter, VenueRepository,
};
use crate::error::Result;

#[derive(Debug, Clone, Serialize)]
pub struct VenueDetail {
    #[serde(flatten)]
    pub venue: venues::Model,
    pub past_shows: Vec<ArtistShow>,
    pub upcoming_shows: Vec<ArtistShow>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArtistDetail {
    #[serde(flatten)]
    pub artist: artists::Model,
    pub past_shows: Vec<VenueShow>,
    pub upcoming_shows: Vec<VenueShow>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

/// Venues grouped by (city, state) with their upcoming show counts.
pub async fn venue_areas(
    db: &DatabaseConnection,
    reference_time: DateTime<Utc>,
) -> Result<Vec<AreaSummary>> {
    let venue_repo = VenueRepository::new(db.clone());
    let areas = venue_repo.list_areas().await?;
    let venues = venue_repo.list(&VenueFilter::default()).await?;

    let ids: Vec<i32> = venues.iter().map(|v| v.id).collect();
    let shows = ShowRepository::new(db.clone())
        .list_for_many(ShowOwner::Venue, &ids)
        .await?;
    let counts = aggregate::upcoming_counts(&shows, |s| s.venue_id, reference_time);

    Ok(aggregate::group_by_area(&areas, &venues, &counts))
}

pub async fn search_venues(
    db: &DatabaseConnection,
    term: &str,
    reference_time: DateTime<Utc>,
) -> Result<SearchResults> {
    if term.trim().is_empty() {
        return Ok(SearchResults::empty());
    }

    let candidates: Vec<venues::Model> = VenueRepository::new(db.clone())
        .list(&VenueFilter::default())
        .await?
        .into_iter()
        .filter(|v| search::matches(&v.name, term))
        .collect();

    let ids: Vec<i32> = candidates.iter().map(|v| v.id).collect();
    let shows = ShowRepository::new(db.clone())
        .list_for_many(ShowOwner::Venue, &ids)
        .await?;
    let counts = aggregate::upcoming_counts(&shows, |s| s.venue_id, reference_time);

    tracing::debug!("Venue search {:?} matched {}", term, candidates.len());
    Ok(search::search(&candidates, term, |id| {
        aggregate::count_for(&counts, id)
    }))
}

pub async fn venue_detail(
    db: &DatabaseConnection,
    id: i32,
    reference_time: DateTime<Utc>,
) -> Result<VenueDetail> {
    let venue = VenueRepository::new(db.clone()).get(id).await?;
    let shows = ShowRepository::new(db.clone())
        .list_for(ShowOwner::Venue, id)
        .await?;

    let artist_ids = join::referenced_ids(&shows, |s| s.artist_id);
    let artists = ArtistRepository::new(db.clone())
        .find_by_ids(&artist_ids)
        .await?;

    let resolved = join::resolve_venue_side(&shows, &artists)?;
    let split = partition(&resolved, reference_time);

    Ok(VenueDetail {
        venue,
        past_shows_count: split.past_count(),
        upcoming_shows_count: split.upcoming_count(),
        past_shows: split.past,
        upcoming_shows: split.upcoming,
    })
}

/// All artists with their upcoming show counts, in store order.
pub async fn artist_list(
    db: &DatabaseConnection,
    reference_time: DateTime<Utc>,
) -> Result<Vec<EntitySummary>> {
    let artists = ArtistRepository::new(db.clone()).list().await?;

    let ids: Vec<i32> = artists.iter().map(|a| a.id).collect();
    let shows = ShowRepository::new(db.clone())
        .list_for_many(ShowOwner::Artist, &ids)
        .await?;
    let counts = aggregate::upcoming_counts(&shows, |s| s.artist_id, reference_time);

    Ok(artists
        .into_iter()
        .map(|a| EntitySummary {
            num_upcoming_shows: aggregate::count_for(&counts, a.id),
            id: a.id,
            name: a.name,
        })
        .collect())
}

pub async fn search_artists(
    db: &DatabaseConnection,
    term: &str,
    reference_time: DateTime<Utc>,
) -> Result<SearchResults> {
    if term.trim().is_empty() {
        return Ok(SearchResults::empty());
    }

    let candidates: Vec<artists::Model> = ArtistRepository::new(db.clone())
        .list()
        .await?
        .into_iter()
        .filter(|a| search::matches(&a.name, term))
        .collect();

    let ids: Vec<i32> = candidates.iter().map(|a| a.id).collect();
    let shows = ShowRepository::new(db.clone())
        .list_for_many(ShowOwner::Artist, &ids)
        .await?;
    let counts = aggregate::upcoming_counts(&shows, |s| s.artist_id, reference_time);

    tracing::debug!("Artist search {:?} matched {}", term, candidates.len());
    Ok(search::search(&candidates, term, |id| {
        aggregate::count_for(&counts, id)
    }))
}

pub async fn artist_detail(
    db: &DatabaseConnection,
    id: i32,
    reference_time: DateTime<Utc>,
) -> Result<ArtistDetail> {
    let artist = ArtistRepository::new(db.clone()).get(id).await?;
    let shows = ShowRepository::new(db.clone())
        .list_for(ShowOwner::Artist, id)
        .await?;

    let venue_ids = join::referenced_ids(&shows, |s| s.venue_id);
    let venues = VenueRepository::new(db.clone())
        .find_by_ids(&venue_ids)
        .await?;

    let resolved = join::resolve_artist_side(&shows, &venues)?;
    let split = partition(&resolved, reference_time);

    Ok(ArtistDetail {
        artist,
        past_shows_count: split.past_count(),
        upcoming_shows_count: split.upcoming_count(),
        past_shows: split.past,
        upcoming_shows: split.upcoming,
    })
}

/// Every show with venue and artist names, earliest first.
pub async fn show_listing(db: &DatabaseConnection) -> Result<Vec<ShowListing>> {
    let shows = ShowRepository::new(db.clone()).list_all().await?;

    let venue_ids = join::referenced_ids(&shows, |s| s.venue_id);
    let artist_ids = join::referenced_ids(&shows, |s| s.artist_id);
    let venues = VenueRepository::new(db.clone())
        .find_by_ids(&venue_ids)
        .await?;
    let artists = ArtistRepository::new(db.clone())
        .find_by_ids(&artist_ids)
        .await?;

    join::resolve_listing(&shows, &venues, &artists)
}
