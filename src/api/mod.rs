mod error;
mod handlers;

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::booking::{BookingService, BookingWindow};
use crate::db::Database;

pub use error::ApiError;

/// Shared handler state.
pub type AppState = BookingService<Database>;

pub fn create_router(db: Database, window: BookingWindow) -> Router {
    let api = Router::new()
        // Bookings
        .route(
            "/bookings",
            get(handlers::list_bookings).post(handlers::create_booking),
        )
        // Rooms
        .route("/rooms", get(handlers::list_rooms))
        .route("/available-rooms", get(handlers::available_rooms))
        // Health
        .route("/health", get(handlers::health));

    Router::new()
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(BookingService::new(db, window))
}
