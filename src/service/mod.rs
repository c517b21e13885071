pub mod announcement_service;
pub mod calendar_service;

use std::sync::Arc;
use sqlx::SqlitePool;
use crate::repository::*;
use announcement_service::AnnouncementService;
use calendar_service::CalendarService;

pub struct ServiceContext {
    pub announcement_service: Arc<AnnouncementService>,
    pub calendar_service: Arc<CalendarService>,
    pub db_pool: SqlitePool,
}

impl ServiceContext {
    pub fn new(
        announcement_repo: Arc<dyn AnnouncementRepository>,
        event_repo: Arc<dyn EventRepository>,
        checkin_repo: Arc<dyn CheckInRepository>,
        db_pool: SqlitePool,
    ) -> Self {
        let announcement_service = Arc::new(AnnouncementService::new(announcement_repo));
        let calendar_service = Arc::new(CalendarService::new(event_repo, checkin_repo));

        Self {
            announcement_service,
            calendar_service,
            db_pool,
        }
    }

    /// Wires the SQLite-backed repositories onto a single pool.
    pub fn from_pool(db_pool: SqlitePool) -> Self {
        Self::new(
            Arc::new(SqliteAnnouncementRepository::new(db_pool.clone())),
            Arc::new(SqliteEventRepository::new(db_pool.clone())),
            Arc::new(SqliteCheckInRepository::new(db_pool.clone())),
            db_pool,
        )
    }
}
