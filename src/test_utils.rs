//! Test utilities for Fyyur
//!
//! Provides helpers for creating isolated test environments with:
//! - In-memory SQLite databases (one per test)
//! - AppState factories
//! - Test data generators

use chrono::{DateTime, Utc};
use migration::MigratorTrait;
use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, Set};

use crate::{
    db::{
        entities::{artists, shows, venues},
        Genres,
    },
    state::AppState,
};

/// Setup an in-memory SQLite database with all migrations applied
///
/// Each call creates a fresh, isolated database
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");

    migration::Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Create a complete test AppState with an isolated database
pub async fn setup_test_app_state() -> AppState {
    let db = setup_test_db().await;
    AppState::new(db)
}

// ============================================================================
// Test Data Factories
// ============================================================================

/// Create a test venue in the database
pub async fn create_test_venue(
    db: &DatabaseConnection,
    name: &str,
    city: &str,
    state: &str,
) -> venues::Model {
    let now = Utc::now().into();
    let venue = venues::ActiveModel {
        name: Set(name.to_string()),
        city: Set(city.to_string()),
        state: Set(state.to_string()),
        address: Set("1 Test Street".to_string()),
        phone: Set(None),
        image_link: Set(None),
        facebook_link: Set(None),
        website: Set(None),
        genres: Set(Genres::new(["Jazz"])),
        seeking_talent: Set(false),
        seeking_description: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    venue.insert(db).await.expect("Failed to insert test venue")
}

/// Create a test artist in the database
pub async fn create_test_artist(db: &DatabaseConnection, name: &str) -> artists::Model {
    let now = Utc::now().into();
    let artist = artists::ActiveModel {
        name: Set(name.to_string()),
        city: Set("San Francisco".to_string()),
        state: Set("CA".to_string()),
        phone: Set(None),
        genres: Set(Genres::new(["Rock n Roll"])),
        image_link: Set(Some(format!("https://img.example/{}", name))),
        facebook_link: Set(None),
        website: Set(None),
        seeking_venue: Set(false),
        seeking_description: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    artist.insert(db).await.expect("Failed to insert test artist")
}

/// Create a test show in the database
pub async fn create_test_show(
    db: &DatabaseConnection,
    venue_id: i32,
    artist_id: i32,
    start_time: DateTime<Utc>,
) -> shows::Model {
    let show = shows::ActiveModel {
        venue_id: Set(venue_id),
        artist_id: Set(artist_id),
        start_time: Set(start_time.into()),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    };

    show.insert(db).await.expect("Failed to insert test show")
}
