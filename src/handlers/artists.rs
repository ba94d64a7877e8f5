use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::{ReferenceQuery, SearchQuery};
use crate::{
    db::repositories::ArtistRepository,
    error::Result,
    services::{directory, ArtistDetail, EntitySummary, SearchResults},
    state::AppState,
};

/// All artists with upcoming show counts
pub async fn list_artists(
    State(state): State<AppState>,
    Query(reference): Query<ReferenceQuery>,
) -> Result<Json<Vec<EntitySummary>>> {
    let reference_time = reference.reference_time()?;
    Ok(Json(directory::artist_list(&state.db, reference_time).await?))
}

pub async fn search_artists(
    State(state): State<AppState>,
    Query(search): Query<SearchQuery>,
    Query(reference): Query<ReferenceQuery>,
) -> Result<Json<SearchResults>> {
    let reference_time = reference.reference_time()?;
    Ok(Json(
        directory::search_artists(&state.db, &search.search_term, reference_time).await?,
    ))
}

/// Artist with their past and upcoming shows
pub async fn get_artist(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(reference): Query<ReferenceQuery>,
) -> Result<Json<ArtistDetail>> {
    let reference_time = reference.reference_time()?;
    Ok(Json(directory::artist_detail(&state.db, id, reference_time).await?))
}

pub async fn delete_artist(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode> {
    ArtistRepository::new(state.db.clone()).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
