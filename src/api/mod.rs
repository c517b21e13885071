pub mod extract;
pub mod handlers;
pub mod state;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    trace::TraceLayer,
};
use std::sync::Arc;

use crate::service::ServiceContext;
use state::AppState;

pub fn create_app(service_context: Arc<ServiceContext>) -> Router {
    let app_state = AppState::new(service_context);

    Router::new()
        // Root and health endpoints
        .route("/", get(handlers::root::root))
        .route("/health", get(handlers::root::health_check))

        .merge(circle_routes())
        .merge(event_routes())
        .merge(checkin_routes())

        // Add state to the router
        .with_state(app_state)

        // Middleware
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

// Paths are registered with and without the trailing slash; clients use both.

fn circle_routes() -> Router<AppState> {
    Router::new()
        .route("/api/circles/get_announcements/:circle_id/", get(handlers::announcements::list))
        .route("/api/circles/get_announcements/:circle_id", get(handlers::announcements::list))
        .route("/api/circles/create_announcement/", post(handlers::announcements::create))
        .route("/api/circles/create_announcement", post(handlers::announcements::create))
}

fn event_routes() -> Router<AppState> {
    Router::new()
        .route("/events/", get(handlers::events::list).post(handlers::events::create))
        .route("/events", get(handlers::events::list).post(handlers::events::create))
        .route("/events/upcoming", get(handlers::events::upcoming))
        .route("/events/upcoming/", get(handlers::events::upcoming))
        .route("/events/:event_id/attendees", get(handlers::events::attendees))
        .route("/events/:event_id/attendees/", get(handlers::events::attendees))
}

fn checkin_routes() -> Router<AppState> {
    Router::new()
        .route("/checkins/user/:user_id", get(handlers::checkins::list_for_user))
        .route("/checkins/user/:user_id/", get(handlers::checkins::list_for_user))
        .route("/checkin/", post(handlers::checkins::create))
        .route("/checkin", post(handlers::checkins::create))
}
