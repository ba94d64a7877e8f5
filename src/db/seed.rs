//! Sample venues, artists and shows for a fresh install.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, TransactionTrait};

use super::entities::{artists, venues};
use super::genres::Genres;
use super::repositories::{NewArtist, NewShow, NewVenue};
use crate::error::{AppError, Result};

/// A booking between the `venue`-th venue and `artist`-th artist of a data set.
struct Booking {
    venue: usize,
    artist: usize,
    start_time: &'static str,
}

fn booking(venue: usize, artist: usize, start_time: &'static str) -> Booking {
    Booking {
        venue,
        artist,
        start_time,
    }
}

struct DataSet {
    venues: Vec<NewVenue>,
    artists: Vec<NewArtist>,
    bookings: Vec<Booking>,
}

/// Inserts the demo data set when the store holds no venues and no artists.
/// Returns whether anything was written.
pub async fn seed_demo_data(db: &DatabaseConnection) -> Result<bool> {
    insert_data_set(db, demo_data()).await
}

/// Writes the whole set in one transaction. A failure part way through leaves
/// the store as it was, so a later start can try again.
async fn insert_data_set(db: &DatabaseConnection, data: DataSet) -> Result<bool> {
    let venue_count = venues::Entity::find().count(db).await?;
    let artist_count = artists::Entity::find().count(db).await?;
    if venue_count + artist_count > 0 {
        tracing::info!(
            "Skipping demo data, store already has {} venues and {} artists",
            venue_count,
            artist_count
        );
        return Ok(false);
    }

    let txn = db.begin().await?;

    let mut venue_ids = Vec::with_capacity(data.venues.len());
    for venue in data.venues {
        venue_ids.push(venue.into_active_model().insert(&txn).await?.id);
    }
    let mut artist_ids = Vec::with_capacity(data.artists.len());
    for artist in data.artists {
        artist_ids.push(artist.into_active_model().insert(&txn).await?.id);
    }

    for booking in &data.bookings {
        let show = NewShow {
            venue_id: lookup(&venue_ids, booking.venue, "venue")?,
            artist_id: lookup(&artist_ids, booking.artist, "artist")?,
            start_time: timestamp(booking.start_time)?,
        };
        show.into_active_model().insert(&txn).await?;
    }

    txn.commit().await?;

    tracing::info!(
        "Seeded demo data: {} venues, {} artists, {} shows",
        venue_ids.len(),
        artist_ids.len(),
        data.bookings.len()
    );
    Ok(true)
}

fn lookup(ids: &[i32], index: usize, entity: &str) -> Result<i32> {
    ids.get(index).copied().ok_or_else(|| {
        AppError::Internal(format!("Demo booking names missing {} #{}", entity, index))
    })
}

fn timestamp(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| AppError::Internal(format!("Bad demo timestamp {}: {}", value, e)))
}

fn demo_data() -> DataSet {
    let venues = vec![
        NewVenue {
            name: "The Musical Hop".to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            address: "1015 Folsom Street".to_string(),
            phone: Some("123-123-1234".to_string()),
            image_link: Some("https://images.unsplash.com/photo-1543900694-133f37abaaa5?ixlib=rb-1.2.1&auto=format&fit=crop&w=400&q=60".to_string()),
            facebook_link: Some("https://www.facebook.com/TheMusicalHop".to_string()),
            website: Some("https://www.themusicalhop.com".to_string()),
            genres: Genres::new(["Jazz", "Reggae", "Classical", "Folk"]),
            seeking_talent: true,
            seeking_description: Some(
                "We are on the lookout for a local artist to play every two weeks. Please call us."
                    .to_string(),
            ),
        },
        NewVenue {
            name: "The Dueling Pianos Bar".to_string(),
            city: "New York".to_string(),
            state: "NY".to_string(),
            address: "335 Delancey Street".to_string(),
            phone: Some("914-003-1132".to_string()),
            image_link: Some("https://images.unsplash.com/photo-1497032205916-ac775f0649ae?ixlib=rb-1.2.1&auto=format&fit=crop&w=750&q=80".to_string()),
            facebook_link: Some("https://www.facebook.com/theduelingpianos".to_string()),
            website: Some("https://www.theduelingpianos.com".to_string()),
            genres: Genres::new(["Classical", "R&B", "Hip-Hop"]),
            seeking_talent: false,
            seeking_description: None,
        },
        NewVenue {
            name: "Park Square Live Music & Coffee".to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            address: "34 Whiskey Moore Ave".to_string(),
            phone: Some("415-000-1234".to_string()),
            image_link: Some("https://images.unsplash.com/photo-1485686531765-ba63b07845a7?ixlib=rb-1.2.1&auto=format&fit=crop&w=747&q=80".to_string()),
            facebook_link: Some("https://www.facebook.com/ParkSquareLiveMusicAndCoffee".to_string()),
            website: Some("https://www.parksquarelivemusicandcoffee.com".to_string()),
            genres: Genres::new(["Rock n Roll", "Jazz", "Classical", "Folk"]),
            seeking_talent: false,
            seeking_description: None,
        },
    ];

    let artists = vec![
        NewArtist {
            name: "Guns N Petals".to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            phone: Some("326-123-5000".to_string()),
            genres: Genres::new(["Rock n Roll"]),
            image_link: Some("https://images.unsplash.com/photo-1549213783-8284d0336c4f?ixlib=rb-1.2.1&auto=format&fit=crop&w=300&q=80".to_string()),
            facebook_link: Some("https://www.facebook.com/GunsNPetals".to_string()),
            website: Some("https://www.gunsnpetalsband.com".to_string()),
            seeking_venue: true,
            seeking_description: Some(
                "Looking for shows to perform at in the San Francisco Bay Area!".to_string(),
            ),
        },
        NewArtist {
            name: "Matt Quevedo".to_string(),
            city: "New York".to_string(),
            state: "NY".to_string(),
            phone: Some("300-400-5000".to_string()),
            genres: Genres::new(["Jazz"]),
            image_link: Some("https://images.unsplash.com/photo-1495223153807-b916f75de8c5?ixlib=rb-1.2.1&auto=format&fit=crop&w=334&q=80".to_string()),
            facebook_link: Some("https://www.facebook.com/mattquevedo923251523".to_string()),
            website: None,
            seeking_venue: false,
            seeking_description: None,
        },
        NewArtist {
            name: "The Wild Sax Band".to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            phone: Some("432-325-5432".to_string()),
            genres: Genres::new(["Jazz", "Classical"]),
            image_link: Some("https://images.unsplash.com/photo-1558369981-f9ca78462e61?ixlib=rb-1.2.1&auto=format&fit=crop&w=794&q=80".to_string()),
            facebook_link: None,
            website: None,
            seeking_venue: false,
            seeking_description: None,
        },
    ];

    let bookings = vec![
        booking(0, 0, "2019-05-21T21:30:00Z"),
        booking(2, 1, "2019-06-15T23:00:00Z"),
        booking(2, 2, "2035-04-01T20:00:00Z"),
        booking(2, 2, "2035-04-08T20:00:00Z"),
        booking(2, 2, "2035-04-15T20:00:00Z"),
    ];

    DataSet {
        venues,
        artists,
        bookings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::entities::shows;
    use crate::test_utils::{create_test_venue, setup_test_db};

    #[tokio::test]
    async fn test_seed_populates_empty_store() {
        let db = setup_test_db().await;

        assert!(seed_demo_data(&db).await.unwrap());

        assert_eq!(venues::Entity::find().count(&db).await.unwrap(), 3);
        assert_eq!(artists::Entity::find().count(&db).await.unwrap(), 3);
        assert_eq!(shows::Entity::find().count(&db).await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_seed_skips_populated_store() {
        let db = setup_test_db().await;
        create_test_venue(&db, "Existing Venue", "Austin", "TX").await;

        assert!(!seed_demo_data(&db).await.unwrap());
        assert_eq!(venues::Entity::find().count(&db).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_failed_seed_leaves_store_empty() {
        let db = setup_test_db().await;
        let mut data = demo_data();
        data.bookings.push(booking(0, 9, "2035-04-22T20:00:00Z"));

        let result = insert_data_set(&db, data).await;

        assert!(matches!(result, Err(AppError::Internal(_))));
        assert_eq!(venues::Entity::find().count(&db).await.unwrap(), 0);
        assert_eq!(artists::Entity::find().count(&db).await.unwrap(), 0);
        assert_eq!(shows::Entity::find().count(&db).await.unwrap(), 0);

        // Nothing was left behind, so a retry writes the full set
        assert!(seed_demo_data(&db).await.unwrap());
        assert_eq!(shows::Entity::find().count(&db).await.unwrap(), 5);
    }
}
