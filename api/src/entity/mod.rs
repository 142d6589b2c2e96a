//! SeaORM entities
//!
//! Table models mirroring `migrations/001_initial.sql`. Adapters convert
//! these into domain entities; nothing outside `adapters` should use them.

pub mod cars;
pub mod customers;
pub mod locations;
pub mod reservations;
