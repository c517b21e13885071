use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use crate::{
    domain::{Announcement, AnnouncementListing, CreateAnnouncementRequest},
    error::{AppError, Result},
    repository::AnnouncementRepository,
};

#[derive(FromRow)]
struct AnnouncementRow {
    id: i64,
    user_id: i64,
    circle_id: i64,
    title: String,
    content: String,
    announced_at: NaiveDateTime,
}

#[derive(FromRow)]
struct ListingRow {
    id: i64,
    username: Option<String>,
    title: String,
    content: String,
    announced_at: NaiveDateTime,
}

pub struct SqliteAnnouncementRepository {
    pool: SqlitePool,
}

impl SqliteAnnouncementRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_announcement(row: AnnouncementRow) -> Announcement {
        Announcement {
            id: row.id,
            user_id: row.user_id,
            circle_id: row.circle_id,
            title: row.title,
            content: row.content,
            announced_at: DateTime::from_naive_utc_and_offset(row.announced_at, Utc),
        }
    }

    fn row_to_listing(row: ListingRow) -> AnnouncementListing {
        AnnouncementListing {
            id: row.id,
            user: row.username.unwrap_or_else(|| "Unknown".to_string()),
            title: row.title,
            content: row.content,
            announced_at: DateTime::from_naive_utc_and_offset(row.announced_at, Utc),
        }
    }
}

#[async_trait]
impl AnnouncementRepository for SqliteAnnouncementRepository {
    async fn create(&self, request: CreateAnnouncementRequest) -> Result<Announcement> {
        let now = Utc::now().naive_utc();

        // The author check and the insert are one statement so concurrent
        // writers queue on SQLite's busy timeout instead of failing a lock
        // upgrade.
        let result = sqlx::query(
            r#"
            INSERT INTO announcements (user_id, circle_id, title, content, announced_at)
            SELECT ?, ?, ?, ?, ?
            WHERE EXISTS (SELECT 1 FROM users WHERE id = ?)
            "#
        )
        .bind(request.user_id)
        .bind(request.circle_id)
        .bind(&request.title)
        .bind(&request.content)
        .bind(now)
        .bind(request.user_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        Ok(Announcement {
            id: result.last_insert_rowid(),
            user_id: request.user_id,
            circle_id: request.circle_id,
            title: request.title,
            content: request.content,
            announced_at: DateTime::from_naive_utc_and_offset(now, Utc),
        })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Announcement>> {
        let row = sqlx::query_as::<_, AnnouncementRow>(
            r#"
            SELECT id, user_id, circle_id, title, content, announced_at
            FROM announcements
            WHERE id = ?
            "#
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(row.map(Self::row_to_announcement))
    }

    async fn list_by_circle(&self, circle_id: i64) -> Result<Vec<AnnouncementListing>> {
        let rows = sqlx::query_as::<_, ListingRow>(
            r#"
            SELECT a.id, u.username, a.title, a.content, a.announced_at
            FROM announcements a
            LEFT JOIN users u ON u.id = a.user_id
            WHERE a.circle_id = ?
            ORDER BY a.announced_at DESC, a.id DESC
            "#
        )
        .bind(circle_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(Self::row_to_listing).collect())
    }
}
