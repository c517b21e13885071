use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use crate::{
    domain::{Event, NewEvent},
    error::{AppError, Result},
    repository::EventRepository,
};

#[derive(FromRow)]
struct EventRow {
    id: i64,
    name: String,
    event_type: String,
    date: NaiveDateTime,
    points: i64,
    revenue: f64,
}

pub struct SqliteEventRepository {
    pool: SqlitePool,
}

impl SqliteEventRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_event(row: EventRow) -> Event {
        Event {
            id: row.id,
            name: row.name,
            event_type: row.event_type,
            date: DateTime::from_naive_utc_and_offset(row.date, Utc),
            points: row.points,
            revenue: row.revenue,
        }
    }
}

#[async_trait]
impl EventRepository for SqliteEventRepository {
    async fn create(&self, event: NewEvent) -> Result<Event> {
        let id = sqlx::query(
            r#"
            INSERT INTO events (name, event_type, date, points, revenue)
            VALUES (?, ?, ?, ?, ?)
            "#
        )
        .bind(&event.name)
        .bind(&event.event_type)
        .bind(event.date.naive_utc())
        .bind(event.points)
        .bind(event.revenue)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?
        .last_insert_rowid();

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve created event".to_string())
        })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Event>> {
        let row = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT id, name, event_type, date, points, revenue
            FROM events
            WHERE id = ?
            "#
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(row.map(Self::row_to_event))
    }

    async fn list(&self, day: Option<NaiveDate>) -> Result<Vec<Event>> {
        let rows = match day {
            Some(day) => {
                sqlx::query_as::<_, EventRow>(
                    r#"
                    SELECT id, name, event_type, date, points, revenue
                    FROM events
                    WHERE date(date) = date(?)
                    ORDER BY date ASC, id ASC
                    "#
                )
                .bind(day)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, EventRow>(
                    r#"
                    SELECT id, name, event_type, date, points, revenue
                    FROM events
                    ORDER BY date ASC, id ASC
                    "#
                )
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(Self::row_to_event).collect())
    }

    async fn list_between(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Event>> {
        let rows = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT id, name, event_type, date, points, revenue
            FROM events
            WHERE date(date) >= date(?) AND date(date) <= date(?)
            ORDER BY date ASC, id ASC
            "#
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(Self::row_to_event).collect())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM events WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }
}
