pub mod markers;
pub mod pages;

use axum::Router;
use serde::Deserialize;

use crate::adapters::http::app_state::AppState;

/// Credentials every personal endpoint takes from the query string.
#[derive(Deserialize)]
pub struct AuthQuery {
    pub user_id: i64,
    pub token: Option<String>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(pages::router())
        .nest("/api", markers::router())
}

/// `user_id=..&token=..`, for links the page follows back to the API.
pub(crate) fn auth_query(user_id: i64, token: &str) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .append_pair("user_id", &user_id.to_string())
        .append_pair("token", token)
        .finish()
}
