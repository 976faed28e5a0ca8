use secrecy::SecretString;
use time::Duration;
use tracing::instrument;
use url::Url;

use crate::{
    app_error::{AppError, AppResult},
    application::jwt::{self, Claims, ExpiryPolicy},
};

/// Issues personal web links and checks the tokens they carry.
#[derive(Clone)]
pub struct AccessUseCases {
    secret: SecretString,
    token_ttl: Duration,
    expiry_policy: ExpiryPolicy,
    webapp_url: String,
}

impl AccessUseCases {
    pub fn new(
        secret: SecretString,
        token_ttl: Duration,
        expiry_policy: ExpiryPolicy,
        webapp_url: String,
    ) -> Self {
        Self {
            secret,
            token_ttl,
            expiry_policy,
            webapp_url,
        }
    }

    /// Link to the map view of `user_id`: `{webapp_url}/{user_id}?token=...`.
    #[instrument(skip(self))]
    pub fn personal_link(&self, user_id: i64) -> AppResult<Url> {
        let base = self.webapp_url.trim().trim_end_matches('/');
        if base.is_empty() {
            return Err(AppError::InvalidInput("Web app URL is not configured".into()));
        }

        let mut url = Url::parse(&format!("{base}/{user_id}"))
            .map_err(|e| AppError::InvalidInput(format!("Invalid web app URL: {e}")))?;
        let token = jwt::issue(user_id, &self.secret, self.token_ttl);
        url.query_pairs_mut().append_pair("token", &token);
        Ok(url)
    }

    pub fn authorize(&self, token: Option<&str>, user_id: i64) -> AppResult<Claims> {
        self.authorize_at(token, user_id, jwt::unix_now())
    }

    /// Check that `token` was issued by us for exactly `user_id`.
    ///
    /// The subject is compared as text against the decimal form of `user_id`.
    pub fn authorize_at(&self, token: Option<&str>, user_id: i64, now: i64) -> AppResult<Claims> {
        // A bare `token=` in the query counts as no token at all.
        let token = token
            .filter(|t| !t.is_empty())
            .ok_or(AppError::InvalidCredentials)?;

        let claims = jwt::verify_with(token, &self.secret, now, self.expiry_policy).map_err(|e| {
            tracing::warn!(user_id, reason = %e, "token rejected");
            AppError::InvalidToken(e)
        })?;

        if claims.sub.as_deref() != Some(user_id.to_string().as_str()) {
            tracing::warn!(user_id, "token subject does not match user");
            return Err(AppError::InvalidCredentials);
        }

        Ok(claims)
    }
}
