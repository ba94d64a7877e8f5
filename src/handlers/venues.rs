use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::{ReferenceQuery, SearchQuery};
use crate::{
    db::repositories::VenueRepository,
    error::Result,
    services::{directory, AreaSummary, SearchResults, VenueDetail},
    state::AppState,
};

/// Venues grouped by city and state
pub async fn list_venues(
    State(state): State<AppState>,
    Query(reference): Query<ReferenceQuery>,
) -> Result<Json<Vec<AreaSummary>>> {
    let reference_time = reference.reference_time()?;
    Ok(Json(directory::venue_areas(&state.db, reference_time).await?))
}

pub async fn search_venues(
    State(state): State<AppState>,
    Query(search): Query<SearchQuery>,
    Query(reference): Query<ReferenceQuery>,
) -> Result<Json<SearchResults>> {
    let reference_time = reference.reference_time()?;
    Ok(Json(
        directory::search_venues(&state.db, &search.search_term, reference_time).await?,
    ))
}

/// Venue with its past and upcoming shows
pub async fn get_venue(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(reference): Query<ReferenceQuery>,
) -> Result<Json<VenueDetail>> {
    let reference_time = reference.reference_time()?;
    Ok(Json(directory::venue_detail(&state.db, id, reference_time).await?))
}

pub async fn delete_venue(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode> {
    VenueRepository::new(state.db.clone()).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
