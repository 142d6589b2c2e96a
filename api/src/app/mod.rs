//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between domain entities and ports.

pub mod car_service;
pub mod customer_service;
pub mod reservation_service;

pub use car_service::{CarChanges, CarDraft, CarService};
pub use customer_service::{CustomerService, Registration};
pub use reservation_service::{ReservationRequest, ReservationService};
