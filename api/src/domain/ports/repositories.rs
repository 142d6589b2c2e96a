//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (e.g., PostgreSQL).

use async_trait::async_trait;

use crate::domain::entities::{
    Car, CarAvailability, CarId, CarStatus, CarUpdate, Customer, NewCar, NewCustomer,
    NewReservation, Reservation, ReservationSummary,
};
use crate::error::DomainError;

/// Repository for Customer entities
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Create a new customer
    ///
    /// Fails with `DomainError::DuplicateKey` when the email is taken.
    async fn create(&self, customer: &NewCustomer) -> Result<Customer, DomainError>;

    /// Find a customer by email
    async fn find_by_email(&self, email: &str) -> Result<Option<Customer>, DomainError>;
}

/// Repository for Car entities
#[async_trait]
pub trait CarRepository: Send + Sync {
    /// Find a car by ID
    async fn find_by_id(&self, id: &CarId) -> Result<Option<Car>, DomainError>;

    /// List cars whose status is Available
    async fn find_available(&self) -> Result<Vec<Car>, DomainError>;

    /// List every car, oldest first
    async fn find_all(&self) -> Result<Vec<Car>, DomainError>;

    /// Add a car
    ///
    /// Fails with `DomainError::DuplicateKey` when the license plate is taken.
    async fn create(&self, car: &NewCar) -> Result<Car, DomainError>;

    /// Update rate, status and location. Returns the number of rows changed.
    async fn update(&self, id: &CarId, update: &CarUpdate) -> Result<u64, DomainError>;
}

/// Repository for Reservation entities
///
/// Reservations are only ever created inside a transaction that holds the
/// car's row lock, so creation goes through [`ReservationTransaction`].
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    type Transaction: ReservationTransaction;

    /// Open a transaction
    async fn begin(&self) -> Result<Self::Transaction, DomainError>;

    /// List all reservations with car and customer details, newest start first
    async fn find_all_detailed(&self) -> Result<Vec<ReservationSummary>, DomainError>;
}

/// A single open transaction against the reservation store
///
/// Dropping a transaction without calling `commit` must discard its writes
/// and release any locks it holds.
#[async_trait]
pub trait ReservationTransaction: Send {
    /// Read a car's rate and status, holding an exclusive row lock until the
    /// transaction ends. Returns `None` when the car does not exist.
    async fn lock_car_for_update(
        &mut self,
        car_id: &CarId,
    ) -> Result<Option<CarAvailability>, DomainError>;

    /// Insert a reservation row
    ///
    /// Fails with `DomainError::ReferentialIntegrity` when the customer or
    /// car does not exist.
    async fn insert_reservation(
        &mut self,
        reservation: &NewReservation,
    ) -> Result<Reservation, DomainError>;

    /// Set a car's status. Returns the number of rows changed.
    async fn update_car_status(
        &mut self,
        car_id: &CarId,
        status: CarStatus,
    ) -> Result<u64, DomainError>;

    /// Make all writes durable and release locks
    async fn commit(self) -> Result<(), DomainError>;

    /// Discard all writes and release locks
    async fn rollback(self) -> Result<(), DomainError>;
}
