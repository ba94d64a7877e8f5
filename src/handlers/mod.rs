pub mod artists;
pub mod forms;
pub mod health;
pub mod html;
pub mod shows;
pub mod venues;

use axum::{
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::{
    error::{AppError, Result},
    state::AppState,
};

/// Optional `at` override of the reference time used to split past and
/// upcoming shows. Defaults to now.
#[derive(Debug, Default, Deserialize)]
pub struct ReferenceQuery {
    pub at: Option<String>,
}

impl ReferenceQuery {
    pub fn reference_time(&self) -> Result<DateTime<Utc>> {
        match self.at.as_deref() {
            None | Some("") => Ok(Utc::now()),
            Some(raw) => forms::parse_timestamp(raw).ok_or_else(|| {
                AppError::InvalidArgument(format!("'{}' is not a valid reference time", raw))
            }),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub search_term: String,
}

pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Venue endpoints
        .route("/venues", get(venues::list_venues))
        .route("/venues/search", get(venues::search_venues))
        .route("/venues/:id", get(venues::get_venue).delete(venues::delete_venue))

        // Artist endpoints
        .route("/artists", get(artists::list_artists))
        .route("/artists/search", get(artists::search_artists))
        .route("/artists/:id", get(artists::get_artist).delete(artists::delete_artist))

        // Show endpoints
        .route("/shows", get(shows::list_shows).post(shows::create_show))
        .route("/shows/:id", axum::routing::delete(shows::delete_show))
}

pub fn html_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(html::index))

        // Venues
        .route("/venues", get(html::venues))
        .route("/venues/search", post(html::search_venues))
        .route("/venues/create", get(html::create_venue_form).post(html::create_venue_submission))
        .route("/venues/:id", get(html::show_venue).delete(html::delete_venue))
        .route("/venues/:id/edit", get(html::edit_venue).post(html::edit_venue_submission))

        // Artists
        .route("/artists", get(html::artists))
        .route("/artists/search", post(html::search_artists))
        .route("/artists/create", get(html::create_artist_form).post(html::create_artist_submission))
        .route("/artists/:id", get(html::show_artist).delete(html::delete_artist))
        .route("/artists/:id/edit", get(html::edit_artist).post(html::edit_artist_submission))

        // Shows
        .route("/shows", get(html::shows))
        .route("/shows/create", get(html::create_show_form).post(html::create_show_submission))
        .route("/shows/:id", axum::routing::delete(html::delete_show))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_reference_time_override() {
        let query = ReferenceQuery {
            at: Some("2035-04-01T20:00:00Z".to_string()),
        };
        assert_eq!(
            query.reference_time().unwrap(),
            Utc.with_ymd_and_hms(2035, 4, 1, 20, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_reference_time_rejects_garbage() {
        let query = ReferenceQuery {
            at: Some("tomorrow".to_string()),
        };
        assert!(matches!(
            query.reference_time(),
            Err(AppError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_reference_time_defaults_to_now() {
        let before = Utc::now();
        let at = ReferenceQuery::default().reference_time().unwrap();
        assert!(at >= before);
    }
}
