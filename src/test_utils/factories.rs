//! Test data factories for creating valid test fixtures.
//!
//! Use the closure parameter to override specific fields as needed.

use chrono::{DateTime, TimeZone, Utc};

use crate::use_cases::circle::Circle;

pub fn test_datetime() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

/// Create a test record owned by `user_id`.
pub fn create_test_circle(id: i64, user_id: i64, overrides: impl FnOnce(&mut Circle)) -> Circle {
    let mut circle = Circle {
        id,
        user_id,
        recorded_at: Some(test_datetime()),
        location: serde_json::json!({ "latitude": 52.52, "longitude": 13.405 }),
        kind: "video_note".to_string(),
        media_id: format!("media-{id}"),
        username: Some(format!("@user{user_id}")),
        description: String::new(),
    };
    overrides(&mut circle);
    circle
}
