use std::sync::Arc;
use chrono::{DateTime, Days, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use validator::Validate;
use crate::{
    domain::*,
    error::{AppError, Result},
    repository::{CheckInRepository, EventRepository},
};

pub const DEFAULT_UPCOMING_DAYS: i64 = 7;

const DATE_FORMAT: &str = "%Y-%m-%d";

pub struct CalendarService {
    event_repo: Arc<dyn EventRepository>,
    checkin_repo: Arc<dyn CheckInRepository>,
}

impl CalendarService {
    pub fn new(
        event_repo: Arc<dyn EventRepository>,
        checkin_repo: Arc<dyn CheckInRepository>,
    ) -> Self {
        Self { event_repo, checkin_repo }
    }

    /// Lists events, restricted to one calendar day when `event_date` is
    /// given. An empty string is treated as no filter.
    pub async fn list_events(&self, event_date: Option<&str>) -> Result<Vec<Event>> {
        let day = match event_date.filter(|s| !s.is_empty()) {
            Some(raw) => Some(parse_day(raw)?),
            None => None,
        };

        self.event_repo.list(day).await
    }

    pub async fn list_upcoming(&self, days: Option<i64>) -> Result<Vec<Event>> {
        self.list_upcoming_from(Utc::now().date_naive(), days).await
    }

    /// Events from `today` through `today + days` (default 7), soonest first.
    pub async fn list_upcoming_from(&self, today: NaiveDate, days: Option<i64>) -> Result<Vec<Event>> {
        let (start, end) = upcoming_window(today, days.unwrap_or(DEFAULT_UPCOMING_DAYS))?;

        self.event_repo.list_between(start, end).await
    }

    pub async fn create_event(&self, request: CreateEventRequest) -> Result<Event> {
        request.validate()?;

        let date = parse_event_date(&request.date)?;
        let event = self.event_repo.create(NewEvent {
            name: request.name,
            event_type: request.event_type,
            date,
            points: request.points,
            revenue: request.revenue,
        }).await?;

        tracing::info!(event_id = event.id, "Event created");

        Ok(event)
    }

    pub async fn user_checkins(&self, user_id: i64) -> Result<Vec<UserCheckIn>> {
        self.checkin_repo.list_by_user(user_id).await
    }

    pub async fn event_attendees(&self, event_id: i64) -> Result<Vec<Attendee>> {
        self.checkin_repo.list_attendees(event_id).await
    }

    /// Records that a user attended an event and returns the check-in as it
    /// appears in the user's history.
    pub async fn check_in(&self, request: CheckInRequest) -> Result<UserCheckIn> {
        let checkin = self.checkin_repo.create(request).await?;

        tracing::info!(
            checkin_id = checkin.id,
            user_id = checkin.user_id,
            event_id = checkin.event_id,
            "User checked in"
        );

        let event = self.event_repo.find_by_id(checkin.event_id).await?;

        Ok(UserCheckIn {
            id: checkin.id,
            user_id: checkin.user_id,
            event_id: checkin.event_id,
            timestamp: checkin.timestamp,
            event_name: event.as_ref().map(|e| e.name.clone()).unwrap_or_default(),
            points_earned: event.map(|e| e.points).unwrap_or(0),
        })
    }
}

fn parse_day(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|_| AppError::BadRequest("Invalid date format. Use YYYY-MM-DD".to_string()))
}

/// Inclusive `[today, today + days]` range.
fn upcoming_window(today: NaiveDate, days: i64) -> Result<(NaiveDate, NaiveDate)> {
    let days = u64::try_from(days)
        .map_err(|_| AppError::BadRequest("days must not be negative".to_string()))?;

    let end = today
        .checked_add_days(Days::new(days))
        .ok_or_else(|| AppError::BadRequest("days is out of range".to_string()))?;

    Ok((today, end))
}

/// Accepts a bare day (midnight UTC), an RFC 3339 timestamp, or an
/// offset-less ISO-8601 date-time taken as UTC.
fn parse_event_date(raw: &str) -> Result<DateTime<Utc>> {
    if let Ok(day) = NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        return Ok(day.and_time(NaiveTime::MIN).and_utc());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }

    Err(AppError::BadRequest(
        "Invalid date format. Use YYYY-MM-DD or an ISO-8601 date-time".to_string(),
    ))
}
