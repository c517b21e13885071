use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::iso8601;

#[derive(Debug, Clone, Serialize)]
pub struct CheckIn {
    pub id: i64,
    pub user_id: i64,
    pub event_id: i64,
    #[serde(serialize_with = "iso8601::serialize")]
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CheckInRequest {
    pub user_id: i64,
    pub event_id: i64,
}

/// A user's check-in joined with the event it was for. A check-in whose
/// event no longer exists keeps an empty name and zero points.
#[derive(Debug, Clone, Serialize)]
pub struct UserCheckIn {
    pub id: i64,
    pub user_id: i64,
    pub event_id: i64,
    #[serde(serialize_with = "iso8601::serialize")]
    pub timestamp: DateTime<Utc>,
    pub event_name: String,
    pub points_earned: i64,
}

/// Someone who checked into an event. Missing user rows resolve to empty
/// name and email.
#[derive(Debug, Clone, Serialize)]
pub struct Attendee {
    pub user_id: i64,
    pub name: String,
    pub email: String,
    #[serde(serialize_with = "iso8601::serialize")]
    pub checkin_time: DateTime<Utc>,
}
