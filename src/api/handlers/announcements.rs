use axum::extract::State;

use crate::{
    api::{extract::{Json, Path}, state::AppState},
    domain::{AnnouncementCreated, AnnouncementListing, CreateAnnouncementRequest},
    error::Result,
};

pub async fn list(
    State(state): State<AppState>,
    Path(circle_id): Path<i64>,
) -> Result<Json<Vec<AnnouncementListing>>> {
    let announcements = state.service_context.announcement_service
        .list_for_circle(circle_id)
        .await?;

    Ok(Json(announcements))
}

pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateAnnouncementRequest>,
) -> Result<Json<AnnouncementCreated>> {
    let created = state.service_context.announcement_service
        .create(request)
        .await?;

    Ok(Json(created))
}
