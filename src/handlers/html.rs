//! Server-rendered pages. Read handlers fail through [`PageError`]; form
//! submissions re-render with a notice instead of failing.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use chrono::Utc;
use maud::Markup;
use serde::Deserialize;

use super::forms::{ArtistForm, ShowForm, VenueForm};
use crate::{
    db::repositories::{ArtistRepository, ShowRepository, VenueRepository},
    error::AppError,
    services::directory,
    state::AppState,
    templates::{
        artist_detail_page, artist_form_page, artists_page, error_page, home_page,
        search_page, show_form_page, shows_page, venue_detail_page, venue_form_page,
        venues_page, Notice,
    },
};

const HX_REDIRECT: &str = "hx-redirect";

/// Renders an [`AppError`] as a full error page.
pub struct PageError(AppError);

impl From<AppError> for PageError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let status = self.0.status_code();
        let message = self.0.public_message();
        (status, Html(error_page(status.as_u16(), &message).into_string())).into_response()
    }
}

type PageResult = std::result::Result<Html<String>, PageError>;

#[derive(Debug, Default, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub search_term: String,
}

fn page(markup: Markup) -> Html<String> {
    Html(markup.into_string())
}

fn with_status(status: StatusCode, markup: Markup) -> Response {
    (status, page(markup)).into_response()
}

fn home_with(notice: Notice) -> Html<String> {
    page(home_page(Some(&notice)))
}

/// Home page after a delete. HTMX follows the redirect header; plain clients
/// get the page body.
fn deleted(message: String) -> Response {
    let mut response = home_with(Notice::Success(message)).into_response();
    response
        .headers_mut()
        .insert(HX_REDIRECT, HeaderValue::from_static("/"));
    response
}

pub async fn index() -> Html<String> {
    page(home_page(None))
}

// Venues

pub async fn venues(State(state): State<AppState>) -> PageResult {
    let areas = directory::venue_areas(&state.db, Utc::now()).await?;
    Ok(page(venues_page(&areas)))
}

pub async fn search_venues(
    State(state): State<AppState>,
    Form(form): Form<SearchForm>,
) -> PageResult {
    let results = directory::search_venues(&state.db, &form.search_term, Utc::now()).await?;
    Ok(page(search_page(
        "Search venues",
        "/venues/search",
        "/venues",
        &results,
        &form.search_term,
    )))
}

pub async fn show_venue(State(state): State<AppState>, Path(id): Path<i32>) -> PageResult {
    let detail = directory::venue_detail(&state.db, id, Utc::now()).await?;
    Ok(page(venue_detail_page(&detail)))
}

pub async fn create_venue_form() -> Html<String> {
    page(venue_form_page(
        "List a new venue",
        "/venues/create",
        &VenueForm::default(),
        None,
    ))
}

pub async fn create_venue_submission(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Response {
    let form = VenueForm::from_pairs(pairs);
    let new = match form.validate() {
        Ok(new) => new,
        Err(e) => {
            let notice = Notice::Error(e.public_message());
            return with_status(
                StatusCode::UNPROCESSABLE_ENTITY,
                venue_form_page("List a new venue", "/venues/create", &form, Some(&notice)),
            );
        }
    };

    match VenueRepository::new(state.db.clone()).create(new).await {
        Ok(venue) => {
            tracing::info!("Listed venue {} ({})", venue.id, venue.name);
            home_with(Notice::Success(format!(
                "Venue {} was successfully listed!",
                venue.name
            )))
            .into_response()
        }
        Err(e) => {
            tracing::warn!("Failed to list venue {}: {}", form.name, e);
            with_status(
                e.status_code(),
                home_page(Some(&Notice::Error(format!(
                    "An error occurred. Venue {} could not be listed.",
                    form.name
                )))),
            )
        }
    }
}

pub async fn edit_venue(State(state): State<AppState>, Path(id): Path<i32>) -> PageResult {
    let venue = VenueRepository::new(state.db.clone()).get(id).await?;
    let form = VenueForm::from_model(&venue);
    Ok(page(venue_form_page(
        "Edit venue",
        &format!("/venues/{}/edit", id),
        &form,
        None,
    )))
}

pub async fn edit_venue_submission(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response, PageError> {
    let form = VenueForm::from_pairs(pairs);
    let action = format!("/venues/{}/edit", id);

    let update = match form.to_update() {
        Ok(update) => update,
        Err(e) => {
            let notice = Notice::Error(e.public_message());
            return Ok(with_status(
                StatusCode::UNPROCESSABLE_ENTITY,
                venue_form_page("Edit venue", &action, &form, Some(&notice)),
            ));
        }
    };

    match VenueRepository::new(state.db.clone()).update(id, update).await {
        Ok(_) => Ok(Redirect::to(&format!("/venues/{}", id)).into_response()),
        Err(e @ AppError::NotFound(_)) => Err(e.into()),
        Err(e) => {
            tracing::warn!("Failed to update venue {}: {}", id, e);
            let notice = Notice::Error(format!(
                "An error occurred. Venue {} could not be updated.",
                form.name
            ));
            Ok(with_status(
                e.status_code(),
                venue_form_page("Edit venue", &action, &form, Some(&notice)),
            ))
        }
    }
}

pub async fn delete_venue(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, PageError> {
    let repo = VenueRepository::new(state.db.clone());
    let venue = repo.get(id).await?;
    repo.delete(id).await?;
    tracing::info!("Deleted venue {} ({})", id, venue.name);
    Ok(deleted(format!("Venue {} was successfully deleted.", venue.name)))
}

// Artists

pub async fn artists(State(state): State<AppState>) -> PageResult {
    let artists = directory::artist_list(&state.db, Utc::now()).await?;
    Ok(page(artists_page(&artists)))
}

pub async fn search_artists(
    State(state): State<AppState>,
    Form(form): Form<SearchForm>,
) -> PageResult {
    let results = directory::search_artists(&state.db, &form.search_term, Utc::now()).await?;
    Ok(page(search_page(
        "Search artists",
        "/artists/search",
        "/artists",
        &results,
        &form.search_term,
    )))
}

pub async fn show_artist(State(state): State<AppState>, Path(id): Path<i32>) -> PageResult {
    let detail = directory::artist_detail(&state.db, id, Utc::now()).await?;
    Ok(page(artist_detail_page(&detail)))
}

pub async fn create_artist_form() -> Html<String> {
    page(artist_form_page(
        "List a new artist",
        "/artists/create",
        &ArtistForm::default(),
        None,
    ))
}

pub async fn create_artist_submission(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Response {
    let form = ArtistForm::from_pairs(pairs);
    let new = match form.validate() {
        Ok(new) => new,
        Err(e) => {
            let notice = Notice::Error(e.public_message());
            return with_status(
                StatusCode::UNPROCESSABLE_ENTITY,
                artist_form_page("List a new artist", "/artists/create", &form, Some(&notice)),
            );
        }
    };

    match ArtistRepository::new(state.db.clone()).create(new).await {
        Ok(artist) => {
            tracing::info!("Listed artist {} ({})", artist.id, artist.name);
            home_with(Notice::Success(format!(
                "Artist {} was successfully listed!",
                artist.name
            )))
            .into_response()
        }
        Err(e) => {
            tracing::warn!("Failed to list artist {}: {}", form.name, e);
            with_status(
                e.status_code(),
                home_page(Some(&Notice::Error(format!(
                    "An error occurred. Artist {} could not be listed.",
                    form.name
                )))),
            )
        }
    }
}

pub async fn edit_artist(State(state): State<AppState>, Path(id): Path<i32>) -> PageResult {
    let artist = ArtistRepository::new(state.db.clone()).get(id).await?;
    let form = ArtistForm::from_model(&artist);
    Ok(page(artist_form_page(
        "Edit artist",
        &format!("/artists/{}/edit", id),
        &form,
        None,
    )))
}

pub async fn edit_artist_submission(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response, PageError> {
    let form = ArtistForm::from_pairs(pairs);
    let action = format!("/artists/{}/edit", id);

    let update = match form.to_update() {
        Ok(update) => update,
        Err(e) => {
            let notice = Notice::Error(e.public_message());
            return Ok(with_status(
                StatusCode::UNPROCESSABLE_ENTITY,
                artist_form_page("Edit artist", &action, &form, Some(&notice)),
            ));
        }
    };

    match ArtistRepository::new(state.db.clone()).update(id, update).await {
        Ok(_) => Ok(Redirect::to(&format!("/artists/{}", id)).into_response()),
        Err(e @ AppError::NotFound(_)) => Err(e.into()),
        Err(e) => {
            tracing::warn!("Failed to update artist {}: {}", id, e);
            let notice = Notice::Error(format!(
                "An error occurred. Artist {} could not be updated.",
                form.name
            ));
            Ok(with_status(
                e.status_code(),
                artist_form_page("Edit artist", &action, &form, Some(&notice)),
            ))
        }
    }
}

pub async fn delete_artist(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, PageError> {
    let repo = ArtistRepository::new(state.db.clone());
    let artist = repo.get(id).await?;
    repo.delete(id).await?;
    tracing::info!("Deleted artist {} ({})", id, artist.name);
    Ok(deleted(format!("Artist {} was successfully deleted.", artist.name)))
}

// Shows

pub async fn shows(State(state): State<AppState>) -> PageResult {
    let shows = directory::show_listing(&state.db).await?;
    Ok(page(shows_page(&shows)))
}

pub async fn create_show_form() -> Html<String> {
    page(show_form_page(&ShowForm::default(), None))
}

pub async fn create_show_submission(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Response {
    let form = ShowForm::from_pairs(pairs);
    let new = match form.validate() {
        Ok(new) => new,
        Err(e) => {
            let notice = Notice::Error(e.public_message());
            return with_status(
                StatusCode::UNPROCESSABLE_ENTITY,
                show_form_page(&form, Some(&notice)),
            );
        }
    };

    match ShowRepository::new(state.db.clone()).create(new).await {
        Ok(show) => {
            tracing::info!(
                "Listed show {} (venue {}, artist {})",
                show.id,
                show.venue_id,
                show.artist_id
            );
            home_with(Notice::Success("Show was successfully listed!".to_string()))
                .into_response()
        }
        Err(e @ AppError::Validation(_)) => {
            let notice = Notice::Error(e.public_message());
            with_status(
                StatusCode::UNPROCESSABLE_ENTITY,
                show_form_page(&form, Some(&notice)),
            )
        }
        Err(e) => {
            tracing::warn!("Failed to list show: {}", e);
            with_status(
                e.status_code(),
                home_page(Some(&Notice::Error(
                    "An error occurred. Show could not be listed.".to_string(),
                ))),
            )
        }
    }
}

pub async fn delete_show(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, PageError> {
    ShowRepository::new(state.db.clone()).delete(id).await?;
    tracing::info!("Deleted show {}", id);
    Ok(deleted("Show was successfully deleted.".to_string()))
}
