use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use super::{ApiError, AppState};
use crate::booking::BookingError;
use crate::models::*;

/// Run service work on the blocking pool. Room locks and SQLite calls may
/// wait, and must not hold up the async workers while they do.
async fn blocking<T, F>(service: AppState, f: F) -> Result<T, ApiError>
where
    F: FnOnce(AppState) -> Result<T, BookingError> + Send + 'static,
    T: Send + 'static,
{
    Ok(tokio::task::spawn_blocking(move || f(service)).await??)
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Bookings
// ============================================================

pub async fn list_bookings(State(service): State<AppState>) -> Result<Json<Vec<Booking>>, ApiError> {
    let bookings = blocking(service, |service| service.list_bookings()).await?;
    Ok(Json(bookings))
}

/// The body is taken as a `Result` so malformed JSON is reported like any
/// other validation failure.
pub async fn create_booking(
    State(service): State<AppState>,
    input: Result<Json<CreateBookingInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Booking>), ApiError> {
    let Json(input) = input?;
    let booking = blocking(service, move |service| service.create_booking(input)).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

// ============================================================
// Rooms
// ============================================================

pub async fn list_rooms(State(service): State<AppState>) -> Result<Json<Vec<Room>>, ApiError> {
    let rooms = blocking(service, |service| service.list_rooms()).await?;
    Ok(Json(rooms))
}

pub async fn available_rooms(
    State(service): State<AppState>,
    query: Result<Query<AvailableRoomsQuery>, QueryRejection>,
) -> Result<Json<Vec<RoomSummary>>, ApiError> {
    let Query(query) = query?;
    let rooms = blocking(service, move |service| service.available_rooms(query)).await?;
    Ok(Json(rooms.into_iter().map(Into::into).collect()))
}
