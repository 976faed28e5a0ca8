use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::get,
};
use serde::{Deserialize, Serialize};

use crate::{
    adapters::http::{app_state::AppState, routes::auth_query},
    app_error::AppResult,
    use_cases::access::AccessUseCases,
};

#[derive(Deserialize)]
struct TokenQuery {
    token: Option<String>,
}

/// What the map page needs to call back into the API.
#[derive(Serialize)]
struct UserPage {
    user_id: i64,
    token: String,
    markers_url: String,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/{user_id}", get(user_index))
}

async fn index() -> &'static str {
    "Use your personal link /<user_id>?token=..."
}

async fn user_index(
    State(access): State<Arc<AccessUseCases>>,
    Path(user_id): Path<i64>,
    Query(query): Query<TokenQuery>,
) -> AppResult<impl IntoResponse> {
    access.authorize(query.token.as_deref(), user_id)?;
    let token = query.token.unwrap_or_default();

    Ok(Json(UserPage {
        user_id,
        markers_url: format!("/api/markers?{}", auth_query(user_id, &token)),
        token,
    }))
}
