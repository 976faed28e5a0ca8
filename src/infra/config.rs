use std::net::SocketAddr;

use axum::http::HeaderValue;
use env_helpers::{get_env, get_env_default};
use secrecy::SecretString;
use time::Duration;

use crate::application::jwt::ExpiryPolicy;

pub struct AppConfig {
    /// HMAC key for link tokens. Never log it.
    pub jwt_secret: SecretString,
    pub jwt_ttl: Duration,
    /// Reject tokens without an integer `exp` instead of treating them as non-expiring.
    pub expiry_policy: ExpiryPolicy,
    /// Public base URL of the map view; personal links are built on top of it.
    pub webapp_url: String,
    pub bind_addr: SocketAddr,
    pub database_url: String,
    pub db_max_connections: u32,
    pub cors_origin: HeaderValue,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let jwt_secret: SecretString = SecretString::new(get_env::<String>("JWT_SECRET").into());
        let jwt_ttl_secs: i64 = get_env_default("JWT_TTL_SECONDS", 86_400);
        let require_exp: bool = get_env_default("JWT_REQUIRE_EXP", false);

        let webapp_url: String =
            get_env_default("WEBAPP_URL", String::from("http://localhost:8000"));
        let bind_addr: SocketAddr = get_env_default("BIND_ADDR", "0.0.0.0:8000".parse().unwrap());
        let database_url: String = get_env("DATABASE_URL");
        let db_max_connections: u32 = get_env_default("DATABASE_MAX_CONNECTIONS", 5);
        let cors_origin: HeaderValue =
            get_env_default("CORS_ORIGIN", String::from("http://localhost:8000"))
                .parse()
                .expect("CORS_ORIGIN must be a valid header value");

        Self {
            jwt_secret,
            jwt_ttl: Duration::seconds(jwt_ttl_secs),
            expiry_policy: if require_exp {
                ExpiryPolicy::Required
            } else {
                ExpiryPolicy::Optional
            },
            webapp_url,
            bind_addr,
            database_url,
            db_max_connections,
            cors_origin,
        }
    }
}
