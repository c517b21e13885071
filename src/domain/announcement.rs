use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::iso8601;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Announcement {
    pub id: i64,
    pub user_id: i64,
    pub circle_id: i64,
    pub title: String,
    pub content: String,
    pub announced_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAnnouncementRequest {
    pub user_id: i64,
    pub circle_id: i64,
    #[validate(length(min = 1, max = 255, message = "title must be 1-255 characters"))]
    pub title: String,
    #[validate(length(min = 1, message = "content must not be empty"))]
    pub content: String,
}

/// An announcement as shown in a circle's feed, with the author resolved
/// to a username at read time.
#[derive(Debug, Clone, Serialize)]
pub struct AnnouncementListing {
    pub id: i64,
    pub user: String,
    pub title: String,
    pub content: String,
    #[serde(serialize_with = "iso8601::serialize")]
    pub announced_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnouncementCreated {
    pub message: String,
    pub announcement_id: i64,
}
