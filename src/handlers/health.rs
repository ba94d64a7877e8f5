use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::{error::Result, state::AppState};

/// Liveness plus a round trip to the database.
pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>> {
    state.db.ping().await?;
    Ok(Json(json!({ "status": "ok" })))
}
