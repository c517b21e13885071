use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use crate::{
    domain::{Attendee, CheckIn, CheckInRequest, UserCheckIn},
    error::{AppError, Result},
    repository::CheckInRepository,
};

#[derive(FromRow)]
struct UserCheckInRow {
    id: i64,
    user_id: i64,
    event_id: i64,
    timestamp: NaiveDateTime,
    event_name: Option<String>,
    points_earned: Option<i64>,
}

#[derive(FromRow)]
struct AttendeeRow {
    user_id: i64,
    name: Option<String>,
    email: Option<String>,
    timestamp: NaiveDateTime,
}

pub struct SqliteCheckInRepository {
    pool: SqlitePool,
}

impl SqliteCheckInRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_user_checkin(row: UserCheckInRow) -> UserCheckIn {
        UserCheckIn {
            id: row.id,
            user_id: row.user_id,
            event_id: row.event_id,
            timestamp: DateTime::from_naive_utc_and_offset(row.timestamp, Utc),
            event_name: row.event_name.unwrap_or_default(),
            points_earned: row.points_earned.unwrap_or(0),
        }
    }

    /// Names whichever side of a rejected check-in is missing. Only
    /// consulted after the insert matched nothing.
    async fn missing_referent(&self, request: &CheckInRequest) -> AppError {
        let user: std::result::Result<Option<(i64,)>, sqlx::Error> =
            sqlx::query_as("SELECT id FROM users WHERE id = ?")
                .bind(request.user_id)
                .fetch_optional(&self.pool)
                .await;

        match user {
            Ok(Some(_)) => AppError::NotFound("Event not found".to_string()),
            Ok(None) => AppError::NotFound("User not found".to_string()),
            Err(e) => e.into(),
        }
    }

    fn row_to_attendee(row: AttendeeRow) -> Attendee {
        Attendee {
            user_id: row.user_id,
            name: row.name.unwrap_or_default(),
            email: row.email.unwrap_or_default(),
            checkin_time: DateTime::from_naive_utc_and_offset(row.timestamp, Utc),
        }
    }
}

#[async_trait]
impl CheckInRepository for SqliteCheckInRepository {
    async fn create(&self, request: CheckInRequest) -> Result<CheckIn> {
        let now = Utc::now().naive_utc();

        let result = sqlx::query(
            r#"
            INSERT INTO check_ins (user_id, event_id, timestamp)
            SELECT ?, ?, ?
            WHERE EXISTS (SELECT 1 FROM users WHERE id = ?)
              AND EXISTS (SELECT 1 FROM events WHERE id = ?)
            "#
        )
        .bind(request.user_id)
        .bind(request.event_id)
        .bind(now)
        .bind(request.user_id)
        .bind(request.event_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(self.missing_referent(&request).await);
        }

        Ok(CheckIn {
            id: result.last_insert_rowid(),
            user_id: request.user_id,
            event_id: request.event_id,
            timestamp: DateTime::from_naive_utc_and_offset(now, Utc),
        })
    }

    async fn list_by_user(&self, user_id: i64) -> Result<Vec<UserCheckIn>> {
        let rows = sqlx::query_as::<_, UserCheckInRow>(
            r#"
            SELECT c.id, c.user_id, c.event_id, c.timestamp,
                   e.name AS event_name, e.points AS points_earned
            FROM check_ins c
            LEFT JOIN events e ON e.id = c.event_id
            WHERE c.user_id = ?
            ORDER BY c.timestamp ASC, c.id ASC
            "#
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(Self::row_to_user_checkin).collect())
    }

    async fn list_attendees(&self, event_id: i64) -> Result<Vec<Attendee>> {
        let rows = sqlx::query_as::<_, AttendeeRow>(
            r#"
            SELECT c.user_id, u.name, u.email, c.timestamp
            FROM check_ins c
            LEFT JOIN users u ON u.id = c.user_id
            WHERE c.event_id = ?
            ORDER BY c.timestamp ASC, c.id ASC
            "#
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(Self::row_to_attendee).collect())
    }
}
