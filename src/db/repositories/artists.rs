use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

use super::require_name;
use crate::db::entities::{artists, shows};
use crate::db::genres::Genres;
use crate::error::{AppError, Result};

/// Fields of an artist submission.
#[derive(Debug, Clone, PartialEq)]
pub struct NewArtist {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub genres: Genres,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

/// Edit request for an artist. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArtistUpdate {
    pub name: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub phone: Option<Option<String>>,
    pub genres: Option<Genres>,
    pub image_link: Option<Option<String>>,
    pub facebook_link: Option<Option<String>>,
    pub website: Option<Option<String>>,
    pub seeking_venue: Option<bool>,
    pub seeking_description: Option<Option<String>>,
}

impl NewArtist {
    /// Unsaved row with fresh timestamps.
    pub(crate) fn into_active_model(self) -> artists::ActiveModel {
        let now = Utc::now().into();
        artists::ActiveModel {
            name: Set(self.name),
            city: Set(self.city),
            state: Set(self.state),
            phone: Set(self.phone),
            genres: Set(self.genres),
            image_link: Set(self.image_link),
            facebook_link: Set(self.facebook_link),
            website: Set(self.website),
            seeking_venue: Set(self.seeking_venue),
            seeking_description: Set(self.seeking_description),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
    }
}

pub struct ArtistRepository {
    db: DatabaseConnection,
}

impl ArtistRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<artists::Model>> {
        Ok(artists::Entity::find_by_id(id).one(&self.db).await?)
    }

    pub async fn get(&self, id: i32) -> Result<artists::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Artist {} not found", id)))
    }

    /// All artists in store order (ascending id).
    pub async fn list(&self) -> Result<Vec<artists::Model>> {
        Ok(artists::Entity::find()
            .order_by_asc(artists::Column::Id)
            .all(&self.db)
            .await?)
    }

    pub async fn find_by_ids(&self, ids: &[i32]) -> Result<HashMap<i32, artists::Model>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let found = artists::Entity::find()
            .filter(artists::Column::Id.is_in(ids.to_vec()))
            .all(&self.db)
            .await?;

        Ok(found.into_iter().map(|a| (a.id, a)).collect())
    }

    pub async fn create(&self, new: NewArtist) -> Result<artists::Model> {
        require_name("Artist", &new.name)?;
        let artist = new.into_active_model();

        let txn = self.db.begin().await?;
        let artist = artist.insert(&txn).await?;
        txn.commit().await?;

        tracing::info!("Created artist {} ({})", artist.id, artist.name);
        Ok(artist)
    }

    /// Applies an edit request. Last writer wins when two edits race.
    pub async fn update(&self, id: i32, update: ArtistUpdate) -> Result<artists::Model> {
        if let Some(name) = &update.name {
            require_name("Artist", name)?;
        }

        let txn = self.db.begin().await?;

        let existing = artists::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Artist {} not found", id)))?;

        let mut active: artists::ActiveModel = existing.into();
        if let Some(val) = update.name {
            active.name = Set(val);
        }
        if let Some(val) = update.city {
            active.city = Set(val);
        }
        if let Some(val) = update.state {
            active.state = Set(val);
        }
        if let Some(val) = update.phone {
            active.phone = Set(val);
        }
        if let Some(val) = update.genres {
            active.genres = Set(val);
        }
        if let Some(val) = update.image_link {
            active.image_link = Set(val);
        }
        if let Some(val) = update.facebook_link {
            active.facebook_link = Set(val);
        }
        if let Some(val) = update.website {
            active.website = Set(val);
        }
        if let Some(val) = update.seeking_venue {
            active.seeking_venue = Set(val);
        }
        if let Some(val) = update.seeking_description {
            active.seeking_description = Set(val);
        }
        active.updated_at = Set(Utc::now().into());

        let artist = active.update(&txn).await?;
        txn.commit().await?;

        tracing::info!("Updated artist {} ({})", artist.id, artist.name);
        Ok(artist)
    }

    /// Deletes the artist and every show they are booked for.
    pub async fn delete(&self, id: i32) -> Result<()> {
        let txn = self.db.begin().await?;

        let existing = artists::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Artist {} not found", id)))?;

        let removed = shows::Entity::delete_many()
            .filter(shows::Column::ArtistId.eq(id))
            .exec(&txn)
            .await?;
        artists::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;

        tracing::info!(
            "Deleted artist {} ({}) and {} shows",
            id,
            existing.name,
            removed.rows_affected
        );
        Ok(())
    }
}
