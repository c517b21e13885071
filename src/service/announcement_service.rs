use std::sync::Arc;
use validator::Validate;
use crate::{
    domain::*,
    error::{AppError, Result},
    repository::AnnouncementRepository,
};

pub struct AnnouncementService {
    repo: Arc<dyn AnnouncementRepository>,
}

impl AnnouncementService {
    pub fn new(repo: Arc<dyn AnnouncementRepository>) -> Self {
        Self { repo }
    }

    pub async fn list_for_circle(&self, circle_id: i64) -> Result<Vec<AnnouncementListing>> {
        self.repo.list_by_circle(circle_id).await.map_err(|e| {
            tracing::warn!(circle_id, "Error fetching announcements: {}", e);
            e
        })
    }

    /// Posts an announcement to a circle and returns the creation receipt.
    ///
    /// A missing author is reported as `NotFound`; any storage failure is
    /// logged and collapsed into a generic internal error once the write
    /// has been rolled back.
    pub async fn create(&self, request: CreateAnnouncementRequest) -> Result<AnnouncementCreated> {
        request.validate()?;

        let user_id = request.user_id;
        let circle_id = request.circle_id;

        match self.repo.create(request).await {
            Ok(announcement) => {
                tracing::info!(
                    announcement_id = announcement.id,
                    user_id,
                    circle_id,
                    "Announcement created"
                );
                Ok(AnnouncementCreated {
                    message: "Announcement created successfully".to_string(),
                    announcement_id: announcement.id,
                })
            }
            Err(AppError::NotFound(msg)) => Err(AppError::NotFound(msg)),
            Err(e) => {
                tracing::error!(user_id, circle_id, "Error creating announcement: {}", e);
                Err(AppError::Internal("Failed to create announcement".to_string()))
            }
        }
    }
}
