//! Car handlers
//!
//! Inventory endpoints. Listing is public; adding and updating are admin
//! operations.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::app::{CarChanges, CarDraft};
use crate::domain::entities::{Car, CarId, CarStatus};
use super::AppJson;
use crate::error::AppError;
use crate::AppState;

/// Car as returned by the API
#[derive(Debug, Serialize)]
pub struct CarResponse {
    pub id: String,
    pub make: String,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    pub license_plate: String,
    pub daily_rate: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_id: Option<Uuid>,
    pub status: CarStatus,
    pub created_at: DateTime<Utc>,
}

impl From<Car> for CarResponse {
    fn from(car: Car) -> Self {
        CarResponse {
            id: car.id.to_string(),
            make: car.make,
            model: car.model,
            year: car.year,
            license_plate: car.license_plate,
            daily_rate: car.daily_rate,
            location_id: car.location_id,
            status: car.status,
            created_at: car.created_at,
        }
    }
}

/// Request body for adding a car
#[derive(Debug, Default, Deserialize)]
pub struct CreateCarRequest {
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub license_plate: Option<String>,
    pub daily_rate: Option<Decimal>,
    pub location_id: Option<Uuid>,
    pub status: Option<String>,
}

/// Request body for updating a car
#[derive(Debug, Default, Deserialize)]
pub struct UpdateCarRequest {
    pub daily_rate: Option<Decimal>,
    pub status: Option<String>,
    pub location_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct CreateCarResponse {
    pub message: String,
    pub car: CarResponse,
}

#[derive(Debug, Serialize)]
pub struct UpdateCarResponse {
    pub message: String,
}

fn parse_car_id(raw: &str) -> Result<CarId, AppError> {
    Uuid::parse_str(raw)
        .map(CarId)
        .map_err(|_| AppError::BadRequest(format!("Invalid car id: {}", raw)))
}

/// GET /api/cars
pub async fn list_available_cars(
    State(state): State<AppState>,
) -> Result<Json<Vec<CarResponse>>, AppError> {
    let cars = state.car_service.list_available().await?;
    Ok(Json(cars.into_iter().map(CarResponse::from).collect()))
}

/// GET /api/cars/all
pub async fn list_all_cars(
    State(state): State<AppState>,
) -> Result<Json<Vec<CarResponse>>, AppError> {
    let cars = state.car_service.list_all().await?;
    Ok(Json(cars.into_iter().map(CarResponse::from).collect()))
}

/// GET /api/cars/:car_id
pub async fn get_car(
    State(state): State<AppState>,
    Path(car_id): Path<String>,
) -> Result<Json<CarResponse>, AppError> {
    let car_id = parse_car_id(&car_id)?;
    let car = state.car_service.get(&car_id).await?;
    Ok(Json(car.into()))
}

/// POST /api/cars
pub async fn create_car(
    State(state): State<AppState>,
    AppJson(request): AppJson<CreateCarRequest>,
) -> Result<(StatusCode, Json<CreateCarResponse>), AppError> {
    let draft = CarDraft {
        make: request.make,
        model: request.model,
        year: request.year,
        license_plate: request.license_plate,
        daily_rate: request.daily_rate,
        location_id: request.location_id,
        status: request.status,
    };

    let car = state.car_service.add(&draft).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateCarResponse {
            message: "Car added successfully!".to_string(),
            car: car.into(),
        }),
    ))
}

/// PUT /api/cars/:car_id
pub async fn update_car(
    State(state): State<AppState>,
    Path(car_id): Path<String>,
    AppJson(request): AppJson<UpdateCarRequest>,
) -> Result<Json<UpdateCarResponse>, AppError> {
    let car_id = parse_car_id(&car_id)?;
    let changes = CarChanges {
        daily_rate: request.daily_rate,
        status: request.status,
        location_id: request.location_id,
    };

    state.car_service.update(&car_id, &changes).await?;

    Ok(Json(UpdateCarResponse {
        message: "Car updated successfully.".to_string(),
    }))
}
