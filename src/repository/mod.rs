use async_trait::async_trait;
use chrono::NaiveDate;
use crate::domain::*;
use crate::error::Result;

pub mod user_repository;
pub mod event_repository;
pub mod announcement_repository;
pub mod checkin_repository;

pub use user_repository::SqliteUserRepository;
pub use event_repository::SqliteEventRepository;
pub use announcement_repository::SqliteAnnouncementRepository;
pub use checkin_repository::SqliteCheckInRepository;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: CreateUserRequest) -> Result<UserInfo>;
    async fn find_by_id(&self, id: i64) -> Result<Option<UserInfo>>;
    async fn delete(&self, id: i64) -> Result<()>;
}

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn create(&self, event: NewEvent) -> Result<Event>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Event>>;
    /// All events, or only those falling on `day` when given.
    async fn list(&self, day: Option<NaiveDate>) -> Result<Vec<Event>>;
    /// Events whose calendar day lies in `[start, end]`, soonest first.
    async fn list_between(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Event>>;
    async fn delete(&self, id: i64) -> Result<()>;
}

#[async_trait]
pub trait AnnouncementRepository: Send + Sync {
    /// Fails with `NotFound` when the author does not exist; nothing is
    /// written in that case.
    async fn create(&self, request: CreateAnnouncementRequest) -> Result<Announcement>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Announcement>>;
    async fn list_by_circle(&self, circle_id: i64) -> Result<Vec<AnnouncementListing>>;
}

#[async_trait]
pub trait CheckInRepository: Send + Sync {
    /// Fails with `NotFound` when either the user or the event is missing.
    async fn create(&self, request: CheckInRequest) -> Result<CheckIn>;
    async fn list_by_user(&self, user_id: i64) -> Result<Vec<UserCheckIn>>;
    async fn list_attendees(&self, event_id: i64) -> Result<Vec<Attendee>>;
}
