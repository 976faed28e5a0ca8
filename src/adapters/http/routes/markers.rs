use axum::{
    Json, Router,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{delete, get, patch},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    adapters::http::{
        app_state::AppState,
        routes::{AuthQuery, auth_query},
    },
    app_error::AppResult,
    use_cases::circle::Circle,
};

#[derive(Deserialize)]
struct DescriptionPayload {
    #[serde(default)]
    description: String,
}

#[derive(Serialize)]
struct Marker {
    id: i64,
    user_id: i64,
    data: Option<DateTime<Utc>>,
    location: serde_json::Value,
    #[serde(rename = "type")]
    kind: String,
    media_id: String,
    username: String,
    description: String,
    /// Served by the media proxy on the same origin, not by this router.
    /// Carries the caller's credentials so the proxy can authorize the fetch.
    media_url: String,
}

impl Marker {
    fn from_circle(circle: Circle, auth: &str) -> Self {
        let username = circle
            .username
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| format!("User {}", circle.user_id));
        Self {
            media_url: format!("/api/media/{}?{}", circle.id, auth),
            id: circle.id,
            user_id: circle.user_id,
            data: circle.recorded_at,
            location: circle.location,
            kind: circle.kind,
            media_id: circle.media_id,
            username,
            description: circle.description,
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/markers", get(list_markers))
        .route("/markers/{id}", delete(delete_marker))
        .route("/markers/{id}/description", patch(update_description))
}

async fn list_markers(
    State(app_state): State<AppState>,
    Query(auth): Query<AuthQuery>,
) -> AppResult<impl IntoResponse> {
    app_state
        .access_use_cases
        .authorize(auth.token.as_deref(), auth.user_id)?;

    let records = app_state.circle_use_cases.list(auth.user_id).await?;
    let query = auth_query(auth.user_id, auth.token.as_deref().unwrap_or_default());
    let markers: Vec<Marker> = records
        .into_iter()
        .map(|circle| Marker::from_circle(circle, &query))
        .collect();

    Ok(Json(markers))
}

async fn delete_marker(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    Query(auth): Query<AuthQuery>,
) -> AppResult<impl IntoResponse> {
    app_state
        .access_use_cases
        .authorize(auth.token.as_deref(), auth.user_id)?;

    app_state.circle_use_cases.delete(auth.user_id, id).await?;
    Ok(Json(serde_json::json!({ "status": "ok" })))
}

async fn update_description(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    Query(auth): Query<AuthQuery>,
    Json(payload): Json<DescriptionPayload>,
) -> AppResult<impl IntoResponse> {
    app_state
        .access_use_cases
        .authorize(auth.token.as_deref(), auth.user_id)?;

    let description = app_state
        .circle_use_cases
        .update_description(auth.user_id, id, &payload.description)
        .await?;
    Ok(Json(serde_json::json!({ "status": "ok", "description": description })))
}
