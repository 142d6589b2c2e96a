//! Domain entities
//!
//! Pure domain models representing core business concepts.
//! These are separate from the SeaORM entities in the `entity` module.

pub mod car;
pub mod customer;
pub mod reservation;

pub use car::{Car, CarAvailability, CarId, CarStatus, CarUpdate, NewCar};
pub use customer::{Customer, CustomerId, NewCustomer};
pub use reservation::{
    NewReservation, Reservation, ReservationId, ReservationPeriod, ReservationStatus,
    ReservationSummary,
};
