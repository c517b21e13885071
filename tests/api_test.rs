mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use chrono::{Duration, NaiveDate, NaiveTime, Utc};
use circl::{
    domain::{CreateUserRequest, NewEvent},
    repository::{EventRepository, SqliteEventRepository, UserRepository, SqliteUserRepository},
    service::ServiceContext,
};
use serde_json::json;

async fn seed_user(pool: &sqlx::SqlitePool, username: &str) -> anyhow::Result<i64> {
    let user = SqliteUserRepository::new(pool.clone())
        .create(CreateUserRequest {
            username: username.to_string(),
            name: format!("{} Name", username),
            email: format!("{}@example.com", username),
        })
        .await?;

    Ok(user.id)
}

#[tokio::test]
async fn test_health_and_root() -> anyhow::Result<()> {
    let pool = common::test_pool().await?;
    let app = common::test_app(pool);

    let (status, body) = common::get(&app, "/health").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = common::get(&app, "/").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Circl API");

    Ok(())
}

#[tokio::test]
async fn test_announcement_round_trip_most_recent_first() -> anyhow::Result<()> {
    let pool = common::test_pool().await?;
    let user_id = seed_user(&pool, "ana").await?;
    let app = common::test_app(pool);

    let mut created_ids = Vec::new();
    for title in ["First", "Second"] {
        let (status, body) = common::post_json(
            &app,
            "/api/circles/create_announcement/",
            json!({ "user_id": user_id, "circle_id": 5, "title": title, "content": "Hello circle" }),
        ).await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Announcement created successfully");
        created_ids.push(body["announcement_id"].as_i64().unwrap());
    }

    let (status, body) = common::get(&app, "/api/circles/get_announcements/5/").await?;
    assert_eq!(status, StatusCode::OK);

    let list = body.as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["id"].as_i64(), Some(created_ids[1]));
    assert_eq!(list[0]["title"], "Second");
    assert_eq!(list[0]["user"], "ana");
    assert_eq!(list[0]["content"], "Hello circle");
    assert!(list[0]["announced_at"].as_str().unwrap().contains('T'));
    assert_eq!(list[1]["id"].as_i64(), Some(created_ids[0]));

    let (_, other) = common::get(&app, "/api/circles/get_announcements/6").await?;
    assert_eq!(other, json!([]));

    Ok(())
}

#[tokio::test]
async fn test_announcement_for_missing_user_is_not_found() -> anyhow::Result<()> {
    let pool = common::test_pool().await?;
    let app = common::test_app(pool.clone());

    let (status, body) = common::post_json(
        &app,
        "/api/circles/create_announcement/",
        json!({ "user_id": 404, "circle_id": 1, "title": "Nobody", "content": "Home" }),
    ).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "User not found");

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM announcements")
        .fetch_one(&pool)
        .await?;
    assert_eq!(count, 0);

    Ok(())
}

#[tokio::test]
async fn test_announcement_validation() -> anyhow::Result<()> {
    let pool = common::test_pool().await?;
    let user_id = seed_user(&pool, "val").await?;
    let app = common::test_app(pool);

    let (status, _) = common::post_json(
        &app,
        "/api/circles/create_announcement/",
        json!({ "user_id": user_id, "circle_id": 1, "title": "", "content": "Body" }),
    ).await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    Ok(())
}

#[tokio::test]
async fn test_list_events_rejects_invalid_date() -> anyhow::Result<()> {
    let pool = common::test_pool().await?;
    let app = common::test_app(pool);

    let (status, body) = common::get(&app, "/events/?event_date=2024-02-30").await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid date format. Use YYYY-MM-DD");

    Ok(())
}

#[tokio::test]
async fn test_create_and_filter_events() -> anyhow::Result<()> {
    let pool = common::test_pool().await?;
    let app = common::test_app(pool);

    let (status, created) = common::post_json(
        &app,
        "/events/",
        json!({ "name": "Pitch night", "event_type": "Networking", "date": "2024-06-14", "revenue": 40 }),
    ).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["points"], 10);
    assert_eq!(created["revenue"], 40.0);
    assert_eq!(created["date"], "2024-06-14T00:00:00");

    common::post_json(
        &app,
        "/events",
        json!({ "name": "Retro", "event_type": "Meeting", "date": "2024-06-15T17:45:00", "points": 5 }),
    ).await?;

    let (status, body) = common::get(&app, "/events/?event_date=2024-06-14").await?;
    assert_eq!(status, StatusCode::OK);
    let list = body.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["name"], "Pitch night");
    assert_eq!(list[0]["event_type"], "Networking");

    let (_, all) = common::get(&app, "/events/").await?;
    assert_eq!(all.as_array().unwrap().len(), 2);

    let (_, unfiltered) = common::get(&app, "/events/?event_date=").await?;
    assert_eq!(unfiltered.as_array().unwrap().len(), 2);

    Ok(())
}

async fn seed_around(pool: &sqlx::SqlitePool, today: NaiveDate) -> anyhow::Result<()> {
    let events = SqliteEventRepository::new(pool.clone());
    let noon = today.and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap()).and_utc();

    for (name, date) in [
        ("Yesterday", noon - Duration::days(1)),
        ("Today", noon),
        ("Tomorrow", noon + Duration::days(1)),
        ("Next month", noon + Duration::days(30)),
    ] {
        events.create(NewEvent {
            name: name.to_string(),
            event_type: "Meeting".to_string(),
            date,
            points: 1,
            revenue: 0.0,
        }).await?;
    }

    Ok(())
}

fn names(body: &serde_json::Value) -> Vec<String> {
    body.as_array()
        .map(|list| list.iter().filter_map(|e| e["name"].as_str().map(str::to_string)).collect())
        .unwrap_or_default()
}

#[tokio::test]
async fn test_upcoming_with_zero_days_is_today_only() -> anyhow::Result<()> {
    // Re-run against a fresh database if UTC midnight passes mid-request.
    for _ in 0..3 {
        let today = Utc::now().date_naive();
        let pool = common::test_pool().await?;
        seed_around(&pool, today).await?;
        let app = common::test_app(pool);

        let (zero_status, zero) = common::get(&app, "/events/upcoming?days=0").await?;
        let (week_status, week) = common::get(&app, "/events/upcoming").await?;

        if Utc::now().date_naive() != today {
            continue;
        }

        assert_eq!(zero_status, StatusCode::OK);
        assert_eq!(names(&zero), vec!["Today"]);
        assert_eq!(week_status, StatusCode::OK);
        assert_eq!(names(&week), vec!["Today", "Tomorrow"]);
        return Ok(());
    }

    anyhow::bail!("UTC day kept changing during the test")
}

#[tokio::test]
async fn test_upcoming_window_from_fixed_day() -> anyhow::Result<()> {
    let pool = common::test_pool().await?;
    let today = NaiveDate::from_ymd_opt(2031, 1, 15).unwrap();
    seed_around(&pool, today).await?;
    let context = ServiceContext::from_pool(pool);

    let zero = context.calendar_service.list_upcoming_from(today, Some(0)).await?;
    let zero_names: Vec<&str> = zero.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(zero_names, vec!["Today"]);

    let month = context.calendar_service.list_upcoming_from(today, Some(30)).await?;
    let month_names: Vec<&str> = month.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(month_names, vec!["Today", "Tomorrow", "Next month"]);

    Ok(())
}

#[tokio::test]
async fn test_upcoming_rejects_negative_days() -> anyhow::Result<()> {
    let pool = common::test_pool().await?;
    let app = common::test_app(pool);

    let (status, body) = common::get(&app, "/events/upcoming?days=-1").await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "days must not be negative");

    Ok(())
}

#[tokio::test]
async fn test_extractor_rejections_use_error_body() -> anyhow::Result<()> {
    let pool = common::test_pool().await?;
    let app = common::test_app(pool);

    let (status, body) = common::get(&app, "/events/upcoming?days=abc").await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = common::get(&app, "/checkins/user/not-a-number").await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let request = Request::builder()
        .method("POST")
        .uri("/api/circles/create_announcement/")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))?;
    let (status, body) = common::send(&app, request).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = common::post_json(
        &app,
        "/checkin/",
        json!({ "user_id": "one" }),
    ).await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].is_string());

    Ok(())
}

#[tokio::test]
async fn test_announcement_storage_failures_surface_as_500() -> anyhow::Result<()> {
    let pool = common::test_pool().await?;
    let user_id = seed_user(&pool, "err").await?;
    let app = common::test_app(pool.clone());

    sqlx::query(
        r#"
        CREATE TRIGGER reject_announcements BEFORE INSERT ON announcements
        BEGIN
            SELECT RAISE(ABORT, 'storage offline');
        END
        "#
    )
    .execute(&pool)
    .await?;

    let (status, body) = common::post_json(
        &app,
        "/api/circles/create_announcement/",
        json!({ "user_id": user_id, "circle_id": 2, "title": "Lost", "content": "Never stored" }),
    ).await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Failed to create announcement" }));

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM announcements")
        .fetch_one(&pool)
        .await?;
    assert_eq!(count, 0);

    sqlx::query("DROP TABLE announcements").execute(&pool).await?;

    let (status, body) = common::get(&app, "/api/circles/get_announcements/2/").await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Database error occurred" }));

    Ok(())
}

#[tokio::test]
async fn test_checkin_history_and_attendees() -> anyhow::Result<()> {
    let pool = common::test_pool().await?;
    let user_id = seed_user(&pool, "jo").await?;
    let events = SqliteEventRepository::new(pool.clone());
    let event = events.create(NewEvent {
        name: "Founders lunch".to_string(),
        event_type: "Social".to_string(),
        date: Utc::now(),
        points: 25,
        revenue: 0.0,
    }).await?;
    let empty_event = events.create(NewEvent {
        name: "Quiet hour".to_string(),
        event_type: "Social".to_string(),
        date: Utc::now(),
        points: 1,
        revenue: 0.0,
    }).await?;

    let app = common::test_app(pool);

    let (status, checkin) = common::post_json(
        &app,
        "/checkin/",
        json!({ "user_id": user_id, "event_id": event.id }),
    ).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(checkin["event_name"], "Founders lunch");
    assert_eq!(checkin["points_earned"], 25);

    let (status, _) = common::post_json(
        &app,
        "/checkin/",
        json!({ "user_id": user_id, "event_id": event.id + 1000 }),
    ).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = common::get(&app, &format!("/checkins/user/{}", user_id)).await?;
    assert_eq!(status, StatusCode::OK);
    let history = body.as_array().unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["user_id"].as_i64(), Some(user_id));
    assert_eq!(history[0]["event_id"].as_i64(), Some(event.id));
    assert_eq!(history[0]["event_name"], "Founders lunch");
    assert_eq!(history[0]["points_earned"], 25);
    assert!(!history[0]["timestamp"].as_str().unwrap().is_empty());

    let (status, body) = common::get(&app, &format!("/events/{}/attendees", event.id)).await?;
    assert_eq!(status, StatusCode::OK);
    let attendees = body.as_array().unwrap();
    assert_eq!(attendees.len(), 1);
    assert_eq!(attendees[0]["name"], "jo Name");
    assert_eq!(attendees[0]["email"], "jo@example.com");
    assert!(attendees[0]["checkin_time"].is_string());

    let (status, body) = common::get(&app, &format!("/events/{}/attendees", empty_event.id)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    Ok(())
}

#[tokio::test]
async fn test_checkin_for_deleted_event_keeps_defaults() -> anyhow::Result<()> {
    let pool = common::test_pool().await?;
    let user_id = seed_user(&pool, "kim").await?;
    let events = SqliteEventRepository::new(pool.clone());
    let event = events.create(NewEvent {
        name: "Gone soon".to_string(),
        event_type: "Workshop".to_string(),
        date: Utc::now(),
        points: 30,
        revenue: 0.0,
    }).await?;

    let app = common::test_app(pool);

    let (status, _) = common::post_json(
        &app,
        "/checkin",
        json!({ "user_id": user_id, "event_id": event.id }),
    ).await?;
    assert_eq!(status, StatusCode::CREATED);

    events.delete(event.id).await?;

    let (status, body) = common::get(&app, &format!("/checkins/user/{}/", user_id)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["event_id"].as_i64(), Some(event.id));
    assert_eq!(body[0]["event_name"], "");
    assert_eq!(body[0]["points_earned"], 0);

    Ok(())
}
