use axum::{extract::State, http::StatusCode};
use serde::Deserialize;

use crate::{
    api::{extract::{Json, Path, Query}, state::AppState},
    domain::{Attendee, CreateEventRequest, Event},
    error::Result,
};

#[derive(Debug, Deserialize)]
pub struct ListEventsQuery {
    pub event_date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpcomingEventsQuery {
    pub days: Option<i64>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListEventsQuery>,
) -> Result<Json<Vec<Event>>> {
    let events = state.service_context.calendar_service
        .list_events(params.event_date.as_deref())
        .await?;

    Ok(Json(events))
}

pub async fn upcoming(
    State(state): State<AppState>,
    Query(params): Query<UpcomingEventsQuery>,
) -> Result<Json<Vec<Event>>> {
    let events = state.service_context.calendar_service
        .list_upcoming(params.days)
        .await?;

    Ok(Json(events))
}

pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<Event>)> {
    let event = state.service_context.calendar_service
        .create_event(request)
        .await?;

    Ok((StatusCode::CREATED, Json(event)))
}

pub async fn attendees(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
) -> Result<Json<Vec<Attendee>>> {
    let attendees = state.service_context.calendar_service
        .event_attendees(event_id)
        .await?;

    Ok(Json(attendees))
}
