//! Car domain entity
//!
//! A car in the rental inventory. The reservation workflow only ever reads
//! the daily rate and status, and flips the status to `Rented`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a car
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CarId(pub Uuid);

impl CarId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CarId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for CarId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CarId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Availability status of a car
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CarStatus {
    Available,
    Rented,
    Maintenance,
}

impl CarStatus {
    /// Only available cars can be reserved
    pub fn is_available(&self) -> bool {
        matches!(self, CarStatus::Available)
    }
}

impl std::fmt::Display for CarStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CarStatus::Available => write!(f, "Available"),
            CarStatus::Rented => write!(f, "Rented"),
            CarStatus::Maintenance => write!(f, "Maintenance"),
        }
    }
}

impl std::str::FromStr for CarStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "available" => Ok(CarStatus::Available),
            "rented" => Ok(CarStatus::Rented),
            "maintenance" => Ok(CarStatus::Maintenance),
            _ => Err(format!("Unknown car status: {}", s)),
        }
    }
}

/// A car in the inventory
#[derive(Debug, Clone, Serialize)]
pub struct Car {
    pub id: CarId,
    pub make: String,
    pub model: String,
    pub year: Option<i32>,
    pub license_plate: String,
    pub daily_rate: Decimal,
    pub location_id: Option<Uuid>,
    pub status: CarStatus,
    pub created_at: DateTime<Utc>,
}

impl Car {
    /// The subset of fields read under the row lock
    pub fn availability(&self) -> CarAvailability {
        CarAvailability {
            daily_rate: self.daily_rate,
            status: self.status,
        }
    }
}

/// Daily rate and status of a car, as read under an exclusive lock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarAvailability {
    pub daily_rate: Decimal,
    pub status: CarStatus,
}

/// Data needed to add a car to the inventory
#[derive(Debug, Clone)]
pub struct NewCar {
    pub make: String,
    pub model: String,
    pub year: Option<i32>,
    pub license_plate: String,
    pub daily_rate: Decimal,
    pub location_id: Option<Uuid>,
    pub status: CarStatus,
}

/// Fields an administrator may change on an existing car
#[derive(Debug, Clone)]
pub struct CarUpdate {
    pub daily_rate: Decimal,
    pub status: CarStatus,
    pub location_id: Option<Uuid>,
}
