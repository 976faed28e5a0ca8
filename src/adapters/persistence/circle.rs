use async_trait::async_trait;

use crate::{
    adapters::persistence::PostgresPersistence,
    app_error::AppResult,
    use_cases::circle::{Circle, CircleRepo},
};

// Column names follow the table the bot writes to.
const SELECT_CIRCLE: &str = r#"SELECT id::BIGINT AS id,
          userid AS user_id,
          data AS recorded_at,
          location,
          type AS kind,
          mediaid AS media_id,
          username,
          COALESCE(description, '') AS description
   FROM circle_records"#;

#[async_trait]
impl CircleRepo for PostgresPersistence {
    async fn list_for_user(&self, user_id: i64) -> AppResult<Vec<Circle>> {
        let recs = sqlx::query_as::<_, Circle>(&format!(
            "{SELECT_CIRCLE} WHERE userid = $1 ORDER BY data DESC"
        ))
        .bind(user_id)
        .fetch_all(self.pool())
        .await?;

        Ok(recs)
    }

    async fn get(&self, record_id: i64) -> AppResult<Option<Circle>> {
        let rec = sqlx::query_as::<_, Circle>(&format!("{SELECT_CIRCLE} WHERE id = $1"))
            .bind(record_id)
            .fetch_optional(self.pool())
            .await?;

        Ok(rec)
    }

    async fn delete(&self, record_id: i64) -> AppResult<()> {
        sqlx::query(r#"DELETE FROM circle_records WHERE id = $1"#)
            .bind(record_id)
            .execute(self.pool())
            .await?;

        Ok(())
    }

    async fn update_description(&self, record_id: i64, description: &str) -> AppResult<()> {
        sqlx::query(r#"UPDATE circle_records SET description = $2 WHERE id = $1"#)
            .bind(record_id)
            .bind(description)
            .execute(self.pool())
            .await?;

        Ok(())
    }
}
