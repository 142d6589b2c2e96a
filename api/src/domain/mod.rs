//! Domain layer
//!
//! Rental business rules with no knowledge of HTTP or SQL.
//! - `entities`: cars, customers and reservations
//! - `ports`: repository traits the adapters implement

pub mod entities;
pub mod ports;
