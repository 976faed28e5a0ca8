use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use tracing::instrument;

use crate::app_error::{AppError, AppResult};

pub const MAX_DESCRIPTION_CHARS: usize = 2000;

/// A location-tagged media entry collected by the bot.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Circle {
    pub id: i64,
    pub user_id: i64,
    pub recorded_at: Option<DateTime<Utc>>,
    pub location: serde_json::Value,
    pub kind: String,
    pub media_id: String,
    pub username: Option<String>,
    pub description: String,
}

#[async_trait]
pub trait CircleRepo: Send + Sync {
    /// Records of `user_id`, newest first.
    async fn list_for_user(&self, user_id: i64) -> AppResult<Vec<Circle>>;
    async fn get(&self, record_id: i64) -> AppResult<Option<Circle>>;
    async fn delete(&self, record_id: i64) -> AppResult<()>;
    async fn update_description(&self, record_id: i64, description: &str) -> AppResult<()>;
}

#[derive(Clone)]
pub struct CircleUseCases {
    repo: Arc<dyn CircleRepo>,
}

impl CircleUseCases {
    pub fn new(repo: Arc<dyn CircleRepo>) -> Self {
        Self { repo }
    }

    pub async fn list(&self, user_id: i64) -> AppResult<Vec<Circle>> {
        self.repo.list_for_user(user_id).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, user_id: i64, record_id: i64) -> AppResult<()> {
        let record = self.owned(user_id, record_id).await?;
        self.repo.delete(record.id).await
    }

    /// Returns the stored (trimmed) description.
    #[instrument(skip(self, description))]
    pub async fn update_description(
        &self,
        user_id: i64,
        record_id: i64,
        description: &str,
    ) -> AppResult<String> {
        if description.chars().count() > MAX_DESCRIPTION_CHARS {
            return Err(AppError::InvalidInput(format!(
                "Description must be at most {MAX_DESCRIPTION_CHARS} characters"
            )));
        }

        let record = self.owned(user_id, record_id).await?;
        let description = description.trim();
        self.repo.update_description(record.id, description).await?;
        Ok(description.to_string())
    }

    async fn owned(&self, user_id: i64, record_id: i64) -> AppResult<Circle> {
        let record = self.repo.get(record_id).await?.ok_or(AppError::NotFound)?;
        if record.user_id != user_id {
            return Err(AppError::Forbidden);
        }
        Ok(record)
    }
}
