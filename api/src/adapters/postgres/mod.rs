//! PostgreSQL adapters
//!
//! Implementations of repository traits using SeaORM and PostgreSQL.

pub mod car_repo;
pub mod customer_repo;
pub mod reservation_repo;


use sea_orm::{DbErr, SqlErr};

use crate::error::DomainError;

pub use car_repo::PostgresCarRepository;
pub use customer_repo::PostgresCustomerRepository;
pub use reservation_repo::PostgresReservationRepository;

/// Classify a SeaORM error into a domain error
///
/// Constraint violations get their own kinds so services can tell a taken
/// email or a dangling customer id apart from an outage.
pub(crate) fn map_db_err(e: DbErr) -> DomainError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => DomainError::DuplicateKey(msg),
        Some(SqlErr::ForeignKeyConstraintViolation(msg)) => DomainError::ReferentialIntegrity(msg),
        _ => DomainError::Database(e.to_string()),
    }
}
