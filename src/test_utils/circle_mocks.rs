//! In-memory mock implementation of `CircleRepo`.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::{
    app_error::{AppError, AppResult},
    use_cases::circle::{Circle, CircleRepo},
};

#[derive(Default)]
pub struct InMemoryCircleRepo {
    pub circles: Mutex<Vec<Circle>>,
}

impl InMemoryCircleRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the repo with initial records.
    pub fn with(circles: Vec<Circle>) -> Self {
        Self {
            circles: Mutex::new(circles),
        }
    }
}

#[async_trait]
impl CircleRepo for InMemoryCircleRepo {
    async fn list_for_user(&self, user_id: i64) -> AppResult<Vec<Circle>> {
        let mut recs: Vec<Circle> = self
            .circles
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.user_id == user_id)
            .cloned()
            .collect();
        recs.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
        Ok(recs)
    }

    async fn get(&self, record_id: i64) -> AppResult<Option<Circle>> {
        Ok(self
            .circles
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == record_id)
            .cloned())
    }

    async fn delete(&self, record_id: i64) -> AppResult<()> {
        self.circles.lock().unwrap().retain(|c| c.id != record_id);
        Ok(())
    }

    async fn update_description(&self, record_id: i64, description: &str) -> AppResult<()> {
        let mut circles = self.circles.lock().unwrap();
        let circle = circles
            .iter_mut()
            .find(|c| c.id == record_id)
            .ok_or(AppError::NotFound)?;
        circle.description = description.to_string();
        Ok(())
    }
}
