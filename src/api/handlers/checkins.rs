use axum::{extract::State, http::StatusCode};

use crate::{
    api::{extract::{Json, Path}, state::AppState},
    domain::{CheckInRequest, UserCheckIn},
    error::Result,
};

pub async fn list_for_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<UserCheckIn>>> {
    let checkins = state.service_context.calendar_service
        .user_checkins(user_id)
        .await?;

    Ok(Json(checkins))
}

pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CheckInRequest>,
) -> Result<(StatusCode, Json<UserCheckIn>)> {
    let checkin = state.service_context.calendar_service
        .check_in(request)
        .await?;

    Ok((StatusCode::CREATED, Json(checkin)))
}
