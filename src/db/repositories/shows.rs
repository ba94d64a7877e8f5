use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

use crate::db::entities::{artists, shows, venues};
use crate::error::{AppError, Result};
use crate::services::aggregate;

/// Fields of a show submission.
#[derive(Debug, Clone, PartialEq)]
pub struct NewShow {
    pub venue_id: i32,
    pub artist_id: i32,
    pub start_time: DateTime<Utc>,
}

impl NewShow {
    pub(crate) fn into_active_model(self) -> shows::ActiveModel {
        shows::ActiveModel {
            venue_id: Set(self.venue_id),
            artist_id: Set(self.artist_id),
            start_time: Set(self.start_time.into()),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        }
    }
}

/// Which side of the booking a show list is queried from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowOwner {
    Venue,
    Artist,
}

impl ShowOwner {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Venue => "venue",
            Self::Artist => "artist",
        }
    }

    fn column(&self) -> shows::Column {
        match self {
            Self::Venue => shows::Column::VenueId,
            Self::Artist => shows::Column::ArtistId,
        }
    }
}

pub struct ShowRepository {
    db: DatabaseConnection,
}

impl ShowRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<shows::Model>> {
        Ok(shows::Entity::find_by_id(id).one(&self.db).await?)
    }

    /// Every show, earliest first.
    pub async fn list_all(&self) -> Result<Vec<shows::Model>> {
        Ok(shows::Entity::find()
            .order_by_asc(shows::Column::StartTime)
            .order_by_asc(shows::Column::Id)
            .all(&self.db)
            .await?)
    }

    /// Shows of one venue or artist, earliest first.
    pub async fn list_for(&self, owner: ShowOwner, id: i32) -> Result<Vec<shows::Model>> {
        Ok(shows::Entity::find()
            .filter(owner.column().eq(id))
            .order_by_asc(shows::Column::StartTime)
            .order_by_asc(shows::Column::Id)
            .all(&self.db)
            .await?)
    }

    /// Shows of several venues or artists at once, earliest first.
    pub async fn list_for_many(&self, owner: ShowOwner, ids: &[i32]) -> Result<Vec<shows::Model>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        Ok(shows::Entity::find()
            .filter(owner.column().is_in(ids.to_vec()))
            .order_by_asc(shows::Column::StartTime)
            .order_by_asc(shows::Column::Id)
            .all(&self.db)
            .await?)
    }

    /// Upcoming shows for one venue or artist. Unknown owners are `NotFound`
    /// rather than zero.
    pub async fn count_upcoming(
        &self,
        owner: ShowOwner,
        id: i32,
        reference_time: DateTime<Utc>,
    ) -> Result<usize> {
        let exists = match owner {
            ShowOwner::Venue => venues::Entity::find_by_id(id).one(&self.db).await?.is_some(),
            ShowOwner::Artist => artists::Entity::find_by_id(id).one(&self.db).await?.is_some(),
        };
        if !exists {
            return Err(AppError::NotFound(format!(
                "{} {} not found",
                owner.as_str(),
                id
            )));
        }

        let owned = self.list_for(owner, id).await?;
        Ok(aggregate::count_upcoming(&owned, reference_time))
    }

    /// Books a show. Both referenced records must exist.
    pub async fn create(&self, new: NewShow) -> Result<shows::Model> {
        let txn = self.db.begin().await?;

        if venues::Entity::find_by_id(new.venue_id).one(&txn).await?.is_none() {
            return Err(AppError::Validation(format!(
                "Venue {} does not exist",
                new.venue_id
            )));
        }
        if artists::Entity::find_by_id(new.artist_id).one(&txn).await?.is_none() {
            return Err(AppError::Validation(format!(
                "Artist {} does not exist",
                new.artist_id
            )));
        }

        let show = new.into_active_model().insert(&txn).await?;
        txn.commit().await?;

        tracing::info!(
            "Created show {} (venue {}, artist {}, {})",
            show.id,
            show.venue_id,
            show.artist_id,
            show.start_time
        );
        Ok(show)
    }

    pub async fn delete(&self, id: i32) -> Result<()> {
        let txn = self.db.begin().await?;

        let result = shows::Entity::delete_by_id(id).exec(&txn).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound(format!("Show {} not found", id)));
        }
        txn.commit().await?;

        tracing::info!("Deleted show {}", id);
        Ok(())
    }
}
