//! Reservation handlers

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::app::ReservationRequest;
use crate::domain::entities::{Reservation, ReservationSummary};
use super::AppJson;
use crate::error::AppError;
use crate::AppState;

/// Request body for creating a reservation
///
/// Fields are optional so the service can report what is missing.
#[derive(Debug, Default, Deserialize)]
pub struct CreateReservationRequest {
    pub customer_id: Option<String>,
    pub car_id: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl From<CreateReservationRequest> for ReservationRequest {
    fn from(body: CreateReservationRequest) -> Self {
        ReservationRequest {
            customer_id: body.customer_id,
            car_id: body.car_id,
            start_date: body.start_date,
            end_date: body.end_date,
        }
    }
}

/// Response body for a created reservation
#[derive(Debug, Serialize)]
pub struct CreateReservationResponse {
    pub message: String,
    pub reservation: Reservation,
}

/// POST /api/reservations
///
/// Book a car. Returns 201 with the confirmed reservation.
pub async fn create_reservation(
    State(state): State<AppState>,
    AppJson(request): AppJson<CreateReservationRequest>,
) -> Result<(StatusCode, Json<CreateReservationResponse>), AppError> {
    let reservation = state
        .reservation_service
        .create_reservation(&request.into())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateReservationResponse {
            message: "Reservation created successfully!".to_string(),
            reservation,
        }),
    ))
}

/// GET /api/reservations
///
/// All reservations with car and customer names, newest first.
pub async fn list_reservations(
    State(state): State<AppState>,
) -> Result<Json<Vec<ReservationSummary>>, AppError> {
    Ok(Json(state.reservation_service.list_reservations().await?))
}
