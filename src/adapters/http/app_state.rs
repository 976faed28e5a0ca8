use std::sync::Arc;

use axum::extract::FromRef;

use crate::{
    infra::config::AppConfig,
    use_cases::{access::AccessUseCases, circle::CircleUseCases},
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub access_use_cases: Arc<AccessUseCases>,
    pub circle_use_cases: Arc<CircleUseCases>,
}

impl FromRef<AppState> for Arc<AccessUseCases> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.access_use_cases.clone()
    }
}
