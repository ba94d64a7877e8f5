//! Integration tests for show API routes

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use chrono::{Duration, TimeZone, Utc};
use pretty_assertions::assert_eq;
use serde_json::json;
use tower::util::ServiceExt;

use fyyur::handlers;
use fyyur::state::AppState;
use fyyur::test_utils::*;

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

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn reference() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2030, 6, 1, 20, 0, 0).unwrap()
}

#[tokio::test]
async fn test_list_shows_joins_names() {
    let state = setup_test_app_state().await;
    let park = create_test_venue(
        &state.db,
        "Park Square Live Music & Coffee",
        "San Francisco",
        "CA",
    )
    .await;
    let hop = create_test_venue(&state.db, "The Musical Hop", "San Francisco", "CA").await;
    let sax = create_test_artist(&state.db, "The Wild Sax Band").await;
    let guns = create_test_artist(&state.db, "Guns N Petals").await;
    let later = create_test_show(
        &state.db,
        park.id,
        sax.id,
        reference() + Duration::days(10),
    )
    .await;
    let earlier = create_test_show(
        &state.db,
        hop.id,
        guns.id,
        reference() - Duration::days(10),
    )
    .await;

    let response = create_test_router(&state)
        .oneshot(Request::builder().uri("/api/shows").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = parse_json_response(response).await;
    let shows = body.as_array().unwrap();
    assert_eq!(shows.len(), 2);
    assert_eq!(shows[0]["show_id"], earlier.id);
    assert_eq!(shows[0]["venue_name"], "The Musical Hop");
    assert_eq!(shows[0]["artist_name"], "Guns N Petals");
    assert_eq!(shows[1]["show_id"], later.id);
    assert_eq!(shows[1]["venue_id"], park.id);
    assert_eq!(shows[1]["artist_id"], sax.id);
}

#[tokio::test]
async fn test_create_show() {
    let state = setup_test_app_state().await;
    let venue = create_test_venue(&state.db, "The Musical Hop", "San Francisco", "CA").await;
    let artist = create_test_artist(&state.db, "Guns N Petals").await;

    let response = create_test_router(&state)
        .oneshot(post_json(
            "/api/shows",
            json!({
                "venue_id": venue.id,
                "artist_id": artist.id,
                "start_time": "2035-04-01 20:00:00",
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: serde_json::Value = parse_json_response(response).await;
    assert_eq!(body["venue_id"], venue.id);
    assert_eq!(body["artist_id"], artist.id);

    let response = create_test_router(&state)
        .oneshot(
            Request::builder()
                .uri(format!("/api/venues/{}?at=2030-01-01T00:00:00Z", venue.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body: serde_json::Value = parse_json_response(response).await;
    assert_eq!(body["upcoming_shows_count"], 1);
}

#[tokio::test]
async fn test_create_show_with_missing_venue() {
    let state = setup_test_app_state().await;
    let artist = create_test_artist(&state.db, "Guns N Petals").await;

    let response = create_test_router(&state)
        .oneshot(post_json(
            "/api/shows",
            json!({
                "venue_id": 42,
                "artist_id": artist.id,
                "start_time": "2035-04-01T20:00:00Z",
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = parse_json_response(response).await;
    assert!(body["error"].as_str().unwrap().contains("Venue 42"));
}

#[tokio::test]
async fn test_create_show_with_bad_start_time() {
    let state = setup_test_app_state().await;
    let venue = create_test_venue(&state.db, "The Musical Hop", "San Francisco", "CA").await;
    let artist = create_test_artist(&state.db, "Guns N Petals").await;

    let response = create_test_router(&state)
        .oneshot(post_json(
            "/api/shows",
            json!({
                "venue_id": venue.id,
                "artist_id": artist.id,
                "start_time": "next friday",
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_delete_show() {
    let state = setup_test_app_state().await;
    let venue = create_test_venue(&state.db, "The Musical Hop", "San Francisco", "CA").await;
    let artist = create_test_artist(&state.db, "Guns N Petals").await;
    let show = create_test_show(&state.db, venue.id, artist.id, reference()).await;

    let delete = || {
        Request::builder()
            .method("DELETE")
            .uri(format!("/api/shows/{}", show.id))
            .body(Body::empty())
            .unwrap()
    };

    let response = create_test_router(&state).oneshot(delete()).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = create_test_router(&state).oneshot(delete()).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_show_rejects_non_positive_ids() {
    let state = setup_test_app_state().await;
    let artist = create_test_artist(&state.db, "Guns N Petals").await;

    let response = create_test_router(&state)
        .oneshot(post_json(
            "/api/shows",
            json!({
                "venue_id": 0,
                "artist_id": artist.id,
                "start_time": "2035-04-01T20:00:00Z",
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = parse_json_response(response).await;
    assert_eq!(body["error"], "Venue ID must be a positive number");
}
