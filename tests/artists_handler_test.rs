//! Integration tests for artist API routes

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::{Duration, TimeZone, Utc};
use pretty_assertions::assert_eq;
use tower::util::ServiceExt;

use fyyur::handlers;
use fyyur::state::AppState;
use fyyur::test_utils::*;

const AT: &str = "2030-06-01T20:00:00Z";

fn create_test_router(state: &AppState) -> Router {
    Router::new()
        .nest("/api", handlers::api_routes())
        .with_state(state.clone())
}

async fn parse_json_response<T: serde::de::DeserializeOwned>(
    response: axum::response::Response,
) -> T {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

async fn get(app: Router, uri: &str) -> axum::response::Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

fn reference() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2030, 6, 1, 20, 0, 0).unwrap()
}

#[tokio::test]
async fn test_list_artists_with_upcoming_counts() {
    let state = setup_test_app_state().await;
    let venue = create_test_venue(
        &state.db,
        "Park Square Live Music & Coffee",
        "San Francisco",
        "CA",
    )
    .await;
    let guns = create_test_artist(&state.db, "Guns N Petals").await;
    let sax = create_test_artist(&state.db, "The Wild Sax Band").await;
    create_test_show(&state.db, venue.id, guns.id, reference() - Duration::days(400)).await;
    for week in 1..=3 {
        create_test_show(&state.db, venue.id, sax.id, reference() + Duration::weeks(week)).await;
    }

    let response = get(create_test_router(&state), &format!("/api/artists?at={}", AT)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = parse_json_response(response).await;
    assert_eq!(
        body,
        serde_json::json!([
            { "id": guns.id, "name": "Guns N Petals", "num_upcoming_shows": 0 },
            { "id": sax.id, "name": "The Wild Sax Band", "num_upcoming_shows": 3 },
        ])
    );
}

#[tokio::test]
async fn test_search_artists_substring() {
    let state = setup_test_app_state().await;
    create_test_artist(&state.db, "Guns N Petals").await;
    create_test_artist(&state.db, "Matt Quevedo").await;
    create_test_artist(&state.db, "The Wild Sax Band").await;

    let response = get(create_test_router(&state), "/api/artists/search?search_term=A").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = parse_json_response(response).await;
    assert_eq!(body["count"], 3);

    let response = get(create_test_router(&state), "/api/artists/search?search_term=band").await;
    let body: serde_json::Value = parse_json_response(response).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["items"][0]["name"], "The Wild Sax Band");
}

#[tokio::test]
async fn test_get_artist_detail() {
    let state = setup_test_app_state().await;
    let hop = create_test_venue(&state.db, "The Musical Hop", "San Francisco", "CA").await;
    let artist = create_test_artist(&state.db, "Guns N Petals").await;
    create_test_show(&state.db, hop.id, artist.id, reference() - Duration::days(1)).await;
    create_test_show(&state.db, hop.id, artist.id, reference()).await;

    let response = get(
        create_test_router(&state),
        &format!("/api/artists/{}?at={}", artist.id, AT),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = parse_json_response(response).await;
    assert_eq!(body["name"], "Guns N Petals");
    assert_eq!(body["seeking_venue"], false);
    assert_eq!(body["past_shows_count"], 1);
    // A show starting exactly at the reference time is upcoming
    assert_eq!(body["upcoming_shows_count"], 1);
    assert_eq!(body["upcoming_shows"][0]["venue_name"], "The Musical Hop");
    assert_eq!(body["upcoming_shows"][0]["venue_id"], hop.id);
}

#[tokio::test]
async fn test_get_artist_not_found() {
    let state = setup_test_app_state().await;

    let response = get(create_test_router(&state), "/api/artists/12").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_artist_invalid_id() {
    let state = setup_test_app_state().await;

    let response = get(create_test_router(&state), "/api/artists/not-a-number").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_artist() {
    let state = setup_test_app_state().await;
    let artist = create_test_artist(&state.db, "Matt Quevedo").await;

    let delete = |id: i32| {
        Request::builder()
            .method("DELETE")
            .uri(format!("/api/artists/{}", id))
            .body(Body::empty())
            .unwrap()
    };

    let response = create_test_router(&state).oneshot(delete(artist.id)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = create_test_router(&state).oneshot(delete(artist.id)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
