use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::iso8601;

#[derive(Debug, Clone, Serialize)]
pub struct Event {
    pub id: i64,
    pub name: String,
    pub event_type: String,
    #[serde(serialize_with = "iso8601::serialize")]
    pub date: DateTime<Utc>,
    pub points: i64,
    pub revenue: f64,
}

/// Body accepted by `POST /events/`. `date` is either a calendar day
/// (`YYYY-MM-DD`, taken as midnight UTC) or a full ISO-8601 date-time.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateEventRequest {
    #[validate(length(min = 1, max = 255, message = "name must be 1-255 characters"))]
    pub name: String,
    #[validate(length(min = 1, message = "event_type must not be empty"))]
    pub event_type: String,
    pub date: String,
    #[serde(default = "default_points")]
    pub points: i64,
    #[serde(default)]
    pub revenue: f64,
}

fn default_points() -> i64 {
    10
}

/// Validated event ready to be written.
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub name: String,
    pub event_type: String,
    pub date: DateTime<Utc>,
    pub points: i64,
    pub revenue: f64,
}
