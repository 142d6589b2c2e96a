//! Reservation domain entity
//!
//! Also holds the rental period arithmetic: a period covers whole calendar
//! days and counts both its first and last day.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::car::CarId;
use super::customer::CustomerId;
use crate::error::DomainError;

/// Unique identifier for a reservation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReservationId(pub Uuid);

impl ReservationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ReservationId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for ReservationId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ReservationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reservation status
///
/// New reservations are always `Confirmed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReservationStatus {
    Confirmed,
    Cancelled,
    Completed,
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReservationStatus::Confirmed => write!(f, "Confirmed"),
            ReservationStatus::Cancelled => write!(f, "Cancelled"),
            ReservationStatus::Completed => write!(f, "Completed"),
        }
    }
}

impl std::str::FromStr for ReservationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "confirmed" => Ok(ReservationStatus::Confirmed),
            "cancelled" | "canceled" => Ok(ReservationStatus::Cancelled),
            "completed" => Ok(ReservationStatus::Completed),
            _ => Err(format!("Unknown reservation status: {}", s)),
        }
    }
}

/// An inclusive range of calendar days
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReservationPeriod {
    start: NaiveDate,
    end: NaiveDate,
}

impl ReservationPeriod {
    /// Build a period, rejecting an end date before the start date
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DomainError> {
        if end < start {
            return Err(DomainError::Validation(
                "End date cannot be before start date.".to_string(),
            ));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of days rented, counting both endpoints. Always >= 1.
    pub fn inclusive_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Total price for renting at `daily_rate` over this period
    ///
    /// Fails with `Validation` when the price does not fit the
    /// `NUMERIC(10, 2)` cost column.
    pub fn total_cost(&self, daily_rate: Decimal) -> Result<Decimal, DomainError> {
        daily_rate
            .checked_mul(Decimal::from(self.inclusive_days()))
            .filter(|cost| *cost <= max_total_cost())
            .ok_or_else(|| {
                DomainError::Validation(
                    "Reservation period is too long for this car's rate.".to_string(),
                )
            })
    }
}

/// Largest value `reservations.total_cost` can hold
fn max_total_cost() -> Decimal {
    Decimal::new(9_999_999_999, 2)
}

/// A persisted reservation
#[derive(Debug, Clone, Serialize)]
pub struct Reservation {
    pub id: ReservationId,
    pub customer_id: CustomerId,
    pub car_id: CarId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_cost: Decimal,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
}

/// Data needed to insert a reservation row
#[derive(Debug, Clone)]
pub struct NewReservation {
    pub customer_id: CustomerId,
    pub car_id: CarId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_cost: Decimal,
    pub status: ReservationStatus,
}

/// A reservation joined with its car and customer, for the admin listing
#[derive(Debug, Clone, Serialize)]
pub struct ReservationSummary {
    pub reservation_id: ReservationId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_cost: Decimal,
    pub status: ReservationStatus,
    pub make: String,
    pub model: String,
    pub first_name: String,
    pub last_name: Option<String>,
}
