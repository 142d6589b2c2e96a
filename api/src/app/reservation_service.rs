//! Reservation service
//!
//! Creates reservations. A booking locks the car row, checks availability,
//! prices the rental, writes the reservation and marks the car rented, all
//! in one transaction. Any failure after `begin` rolls the whole thing back.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate};
use uuid::Uuid;

use crate::domain::entities::{
    CarId, CarStatus, CustomerId, NewReservation, Reservation, ReservationPeriod,
    ReservationStatus, ReservationSummary,
};
use crate::domain::ports::{ReservationRepository, ReservationTransaction};
use crate::error::{AppError, DomainError};

/// Raw reservation input, as received from a client
///
/// Every field is optional so that absence is reported as a validation
/// error rather than a deserialization failure.
#[derive(Debug, Clone, Default)]
pub struct ReservationRequest {
    pub customer_id: Option<String>,
    pub car_id: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// A request whose fields are present and well-formed
///
/// The date order is checked later, under the car lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedReservation {
    pub customer_id: CustomerId,
    pub car_id: CarId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl ReservationRequest {
    /// Check presence and parse every field
    pub fn validate(&self) -> Result<ValidatedReservation, DomainError> {
        let (Some(customer_id), Some(car_id), Some(start_date), Some(end_date)) = (
            non_empty(&self.customer_id),
            non_empty(&self.car_id),
            non_empty(&self.start_date),
            non_empty(&self.end_date),
        ) else {
            return Err(DomainError::Validation(
                "Missing required fields for reservation.".to_string(),
            ));
        };

        Ok(ValidatedReservation {
            customer_id: CustomerId(parse_id(customer_id, "customer_id")?),
            car_id: CarId(parse_id(car_id, "car_id")?),
            start_date: parse_calendar_date(start_date, "start_date")?,
            end_date: parse_calendar_date(end_date, "end_date")?,
        })
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn parse_id(value: &str, field: &str) -> Result<Uuid, DomainError> {
    Uuid::parse_str(value)
        .map_err(|_| DomainError::Validation(format!("Invalid {}: {}", field, value)))
}

/// Parse a calendar date
///
/// Accepts `YYYY-MM-DD`, or an RFC 3339 timestamp whose local date part is
/// taken as written. No time zone conversion is applied.
pub fn parse_calendar_date(value: &str, field: &str) -> Result<NaiveDate, DomainError> {
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.date_naive())
        .map_err(|_| DomainError::Validation(format!("Invalid {}: {}", field, value)))
}

/// Service for creating and listing reservations
pub struct ReservationService<RR>
where
    RR: ReservationRepository,
{
    reservations: Arc<RR>,
}

impl<RR> ReservationService<RR>
where
    RR: ReservationRepository,
{
    pub fn new(reservations: Arc<RR>) -> Self {
        Self { reservations }
    }

    /// Create a confirmed reservation and mark the car rented
    ///
    /// Checks, in order:
    /// 1. all fields present and parseable (`Validation`)
    /// 2. the car exists (`NotFound`)
    /// 3. the car is Available (`Conflict`)
    /// 4. end date is not before start date (`Validation`)
    ///
    /// Checks 2 to 4 run under the car's row lock. Nothing is persisted
    /// unless every step succeeds. No retry happens here; a caller that
    /// retries must start over from this call.
    pub async fn create_reservation(
        &self,
        request: &ReservationRequest,
    ) -> Result<Reservation, AppError> {
        let input = request.validate()?;

        let mut tx = self.reservations.begin().await?;

        match Self::reserve(&mut tx, &input).await {
            Ok(reservation) => {
                tx.commit().await?;
                tracing::info!(
                    reservation_id = %reservation.id,
                    car_id = %reservation.car_id,
                    customer_id = %reservation.customer_id,
                    total_cost = %reservation.total_cost,
                    "Reservation created"
                );
                Ok(reservation)
            }
            Err(e) => {
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::error!(
                        error = %rollback_err,
                        car_id = %input.car_id,
                        "Failed to roll back reservation transaction"
                    );
                }
                tracing::warn!(error = %e, car_id = %input.car_id, "Reservation rolled back");
                Err(e)
            }
        }
    }

    /// The transactional part of the booking. Does not commit.
    async fn reserve(
        tx: &mut RR::Transaction,
        input: &ValidatedReservation,
    ) -> Result<Reservation, AppError> {
        let car = tx
            .lock_car_for_update(&input.car_id)
            .await?
            .ok_or_else(|| AppError::not_found("Car not found."))?;

        if !car.status.is_available() {
            return Err(AppError::conflict("Car is not available for rent."));
        }

        let period = ReservationPeriod::new(input.start_date, input.end_date)?;
        let total_cost = period.total_cost(car.daily_rate)?;

        let new_reservation = NewReservation {
            customer_id: input.customer_id,
            car_id: input.car_id,
            start_date: period.start(),
            end_date: period.end(),
            total_cost,
            status: ReservationStatus::Confirmed,
        };

        let reservation = tx
            .insert_reservation(&new_reservation)
            .await
            .map_err(|e| match e {
                DomainError::ReferentialIntegrity(detail) => {
                    tracing::debug!(%detail, "Reservation insert hit a foreign key");
                    AppError::not_found("Customer ID not found.")
                }
                DomainError::DuplicateKey(detail) => {
                    tracing::debug!(%detail, "Reservation insert hit a unique key");
                    AppError::conflict("Reservation already exists.")
                }
                e => AppError::Domain(e),
            })?;

        let updated = tx.update_car_status(&input.car_id, CarStatus::Rented).await?;
        if updated == 0 {
            // The row is locked, so it cannot have vanished
            return Err(AppError::Internal(format!(
                "Car {} disappeared while locked",
                input.car_id
            )));
        }

        Ok(reservation)
    }

    /// List every reservation with car and customer details
    pub async fn list_reservations(&self) -> Result<Vec<ReservationSummary>, AppError> {
        Ok(self.reservations.find_all_detailed().await?)
    }
}
