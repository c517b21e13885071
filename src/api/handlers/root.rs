use axum::{extract::State, http::StatusCode, Json, response::IntoResponse};
use serde::Serialize;
use serde_json::json;

use crate::api::state::AppState;

#[derive(Serialize)]
pub struct ApiInfo {
    pub name: String,
    pub version: String,
    pub description: String,
    pub status: String,
}

pub async fn root() -> impl IntoResponse {
    Json(ApiInfo {
        name: "Circl API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        description: "Circle announcements, events and check-ins".to_string(),
        status: "operational".to_string(),
    })
}

pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let database = sqlx::query("SELECT 1")
        .execute(&state.service_context.db_pool)
        .await;

    let (status, label) = match database {
        Ok(_) => (StatusCode::OK, "healthy"),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "unhealthy")
        }
    };

    (status, Json(json!({
        "status": label,
        "timestamp": chrono::Utc::now().to_rfc3339()
    })))
}
