use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use serde::Serialize;

use super::require_name;
use crate::db::entities::{shows, venues};
use crate::db::genres::Genres;
use crate::error::{AppError, Result};

/// Fields of a venue submission.
#[derive(Debug, Clone, PartialEq)]
pub struct NewVenue {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub genres: Genres,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

/// Edit request for a venue. `None` leaves the stored value untouched; the
/// whole request is applied in one transaction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VenueUpdate {
    pub name: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub address: Option<String>,
    pub phone: Option<Option<String>>,
    pub image_link: Option<Option<String>>,
    pub facebook_link: Option<Option<String>>,
    pub website: Option<Option<String>>,
    pub genres: Option<Genres>,
    pub seeking_talent: Option<bool>,
    pub seeking_description: Option<Option<String>>,
}

#[derive(Debug, Clone, Default)]
pub struct VenueFilter {
    pub city: Option<String>,
    pub state: Option<String>,
}

/// A distinct (city, state) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, FromQueryResult)]
pub struct Area {
    pub city: String,
    pub state: String,
}

impl NewVenue {
    /// Unsaved row with fresh timestamps.
    pub(crate) fn into_active_model(self) -> venues::ActiveModel {
        let now = Utc::now().into();
        venues::ActiveModel {
            name: Set(self.name),
            city: Set(self.city),
            state: Set(self.state),
            address: Set(self.address),
            phone: Set(self.phone),
            image_link: Set(self.image_link),
            facebook_link: Set(self.facebook_link),
            website: Set(self.website),
            genres: Set(self.genres),
            seeking_talent: Set(self.seeking_talent),
            seeking_description: Set(self.seeking_description),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
    }
}

pub struct VenueRepository {
    db: DatabaseConnection,
}

impl VenueRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<venues::Model>> {
        Ok(venues::Entity::find_by_id(id).one(&self.db).await?)
    }

    pub async fn get(&self, id: i32) -> Result<venues::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Venue {} not found", id)))
    }

    /// Venues matching the filter in store order (ascending id).
    pub async fn list(&self, filter: &VenueFilter) -> Result<Vec<venues::Model>> {
        let mut select = venues::Entity::find();

        if let Some(city) = &filter.city {
            select = select.filter(venues::Column::City.eq(city.as_str()));
        }
        if let Some(state) = &filter.state {
            select = select.filter(venues::Column::State.eq(state.as_str()));
        }

        Ok(select
            .order_by_asc(venues::Column::Id)
            .all(&self.db)
            .await?)
    }

    pub async fn find_by_ids(&self, ids: &[i32]) -> Result<HashMap<i32, venues::Model>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let found = venues::Entity::find()
            .filter(venues::Column::Id.is_in(ids.to_vec()))
            .all(&self.db)
            .await?;

        Ok(found.into_iter().map(|v| (v.id, v)).collect())
    }

    /// Distinct (city, state) pairs, ordered by state then city.
    pub async fn list_areas(&self) -> Result<Vec<Area>> {
        Ok(venues::Entity::find()
            .select_only()
            .column(venues::Column::City)
            .column(venues::Column::State)
            .distinct()
            .order_by_asc(venues::Column::State)
            .order_by_asc(venues::Column::City)
            .into_model::<Area>()
            .all(&self.db)
            .await?)
    }

    pub async fn create(&self, new: NewVenue) -> Result<venues::Model> {
        require_name("Venue", &new.name)?;
        let venue = new.into_active_model();

        let txn = self.db.begin().await?;
        let venue = venue.insert(&txn).await?;
        txn.commit().await?;

        tracing::info!("Created venue {} ({})", venue.id, venue.name);
        Ok(venue)
    }

    /// Applies an edit request. Last writer wins when two edits race.
    pub async fn update(&self, id: i32, update: VenueUpdate) -> Result<venues::Model> {
        if let Some(name) = &update.name {
            require_name("Venue", name)?;
        }

        let txn = self.db.begin().await?;

        let existing = venues::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Venue {} not found", id)))?;

        let mut active: venues::ActiveModel = existing.into();
        if let Some(val) = update.name {
            active.name = Set(val);
        }
        if let Some(val) = update.city {
            active.city = Set(val);
        }
        if let Some(val) = update.state {
            active.state = Set(val);
        }
        if let Some(val) = update.address {
            active.address = Set(val);
        }
        if let Some(val) = update.phone {
            active.phone = Set(val);
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
        if let Some(val) = update.genres {
            active.genres = Set(val);
        }
        if let Some(val) = update.seeking_talent {
            active.seeking_talent = Set(val);
        }
        if let Some(val) = update.seeking_description {
            active.seeking_description = Set(val);
        }
        active.updated_at = Set(Utc::now().into());

        let venue = active.update(&txn).await?;
        txn.commit().await?;

        tracing::info!("Updated venue {} ({})", venue.id, venue.name);
        Ok(venue)
    }

    /// Deletes the venue and every show booked there.
    pub async fn delete(&self, id: i32) -> Result<()> {
        let txn = self.db.begin().await?;

        let existing = venues::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Venue {} not found", id)))?;

        let removed = shows::Entity::delete_many()
            .filter(shows::Column::VenueId.eq(id))
            .exec(&txn)
            .await?;
        venues::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;

        tracing::info!(
            "Deleted venue {} ({}) and {} shows",
            id,
            existing.name,
            removed.rows_affected
        );
        Ok(())
    }
}
