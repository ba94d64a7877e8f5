use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use super::forms;
use crate::{
    db::{entities::shows, repositories::ShowRepository},
    error::Result,
    services::{directory, ShowListing},
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct CreateShowRequest {
    pub venue_id: i32,
    pub artist_id: i32,
    pub start_time: String,
}

/// Every show, earliest first
pub async fn list_shows(State(state): State<AppState>) -> Result<Json<Vec<ShowListing>>> {
    Ok(Json(directory::show_listing(&state.db).await?))
}

pub async fn create_show(
    State(state): State<AppState>,
    Json(payload): Json<CreateShowRequest>,
) -> Result<(StatusCode, Json<shows::Model>)> {
    let new = forms::new_show(payload.venue_id, payload.artist_id, &payload.start_time)?;

    let show = ShowRepository::new(state.db.clone()).create(new).await?;
    Ok((StatusCode::CREATED, Json(show)))
}

pub async fn delete_show(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode> {
    ShowRepository::new(state.db.clone()).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
