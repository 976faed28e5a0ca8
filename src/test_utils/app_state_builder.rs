//! Test app state builder for HTTP-level integration testing.

use std::{net::SocketAddr, sync::Arc};

use axum::http::HeaderValue;
use secrecy::SecretString;
use time::Duration;

use crate::{
    adapters::http::app_state::AppState,
    application::jwt::{self, ExpiryPolicy},
    infra::config::AppConfig,
    test_utils::InMemoryCircleRepo,
    use_cases::{
        access::AccessUseCases,
        circle::{CircleRepo, CircleUseCases},
    },
};

const TEST_SECRET: &str = "memorio-test-secret";

pub struct TestAppStateBuilder {
    circle_repo: Arc<dyn CircleRepo>,
    expiry_policy: ExpiryPolicy,
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestAppStateBuilder {
    pub fn new() -> Self {
        Self {
            circle_repo: Arc::new(InMemoryCircleRepo::new()),
            expiry_policy: ExpiryPolicy::Optional,
        }
    }

    pub fn with_circle_repo(mut self, repo: Arc<dyn CircleRepo>) -> Self {
        self.circle_repo = repo;
        self
    }

    pub fn with_expiry_policy(mut self, policy: ExpiryPolicy) -> Self {
        self.expiry_policy = policy;
        self
    }

    pub fn secret(&self) -> SecretString {
        SecretString::new(TEST_SECRET.into())
    }

    /// A token the built state accepts for `user_id`.
    pub fn token_for(&self, user_id: i64) -> String {
        jwt::issue(user_id, &self.secret(), Duration::hours(1))
    }

    pub fn expired_token_for(&self, user_id: i64) -> String {
        jwt::issue(user_id, &self.secret(), Duration::seconds(-1))
    }

    pub fn config(&self) -> AppConfig {
        AppConfig {
            jwt_secret: self.secret(),
            jwt_ttl: Duration::hours(1),
            expiry_policy: self.expiry_policy,
            webapp_url: "http://localhost:8000".to_string(),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            database_url: "postgres://unused".to_string(),
            db_max_connections: 1,
            cors_origin: HeaderValue::from_static("http://localhost:8000"),
        }
    }

    pub fn build(&self) -> AppState {
        let config = self.config();
        let access_use_cases = AccessUseCases::new(
            config.jwt_secret.clone(),
            config.jwt_ttl,
            config.expiry_policy,
            config.webapp_url.clone(),
        );

        AppState {
            config: Arc::new(config),
            access_use_cases: Arc::new(access_use_cases),
            circle_use_cases: Arc::new(CircleUseCases::new(self.circle_repo.clone())),
        }
    }
}
