//! PostgreSQL adapter for ReservationRepository
//!
//! Reservation creation runs inside a `DatabaseTransaction`. The car row is
//! locked with `SELECT ... FOR UPDATE`, so concurrent bookings of the same
//! car queue behind the first one until it commits or rolls back.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, FromQueryResult, JoinType, QueryFilter, QueryOrder, QuerySelect, RelationTrait,
    Set, TransactionTrait,
};
use uuid::Uuid;

use super::map_db_err;
use crate::domain::entities::{
    Car, CarAvailability, CarId, CarStatus, CustomerId, NewReservation, Reservation, ReservationId,
    ReservationSummary,
};
use crate::domain::ports::{ReservationRepository, ReservationTransaction};
use crate::entity::{cars, customers, reservations};
use crate::error::DomainError;

/// PostgreSQL implementation of ReservationRepository
pub struct PostgresReservationRepository {
    db: DatabaseConnection,
}

impl PostgresReservationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Row shape of the joined reservation listing
#[derive(Debug, FromQueryResult)]
struct ReservationSummaryRow {
    reservation_id: Uuid,
    start_date: NaiveDate,
    end_date: NaiveDate,
    total_cost: Decimal,
    status: String,
    make: String,
    model: String,
    first_name: String,
    last_name: Option<String>,
}

#[async_trait]
impl ReservationRepository for PostgresReservationRepository {
    type Transaction = PostgresReservationTransaction;

    async fn begin(&self) -> Result<Self::Transaction, DomainError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;
        Ok(PostgresReservationTransaction { txn })
    }

    async fn find_all_detailed(&self) -> Result<Vec<ReservationSummary>, DomainError> {
        let rows = reservations::Entity::find()
            .select_only()
            .column_as(reservations::Column::Id, "reservation_id")
            .column(reservations::Column::StartDate)
            .column(reservations::Column::EndDate)
            .column(reservations::Column::TotalCost)
            .column(reservations::Column::Status)
            .column_as(cars::Column::Make, "make")
            .column_as(cars::Column::ModelName, "model")
            .column_as(customers::Column::FirstName, "first_name")
            .column_as(customers::Column::LastName, "last_name")
            .join(JoinType::InnerJoin, reservations::Relation::Cars.def())
            .join(JoinType::InnerJoin, reservations::Relation::Customers.def())
            .order_by_desc(reservations::Column::StartDate)
            .into_model::<ReservationSummaryRow>()
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        rows.into_iter()
            .map(|row| {
                Ok(ReservationSummary {
                    reservation_id: ReservationId(row.reservation_id),
                    start_date: row.start_date,
                    end_date: row.end_date,
                    total_cost: row.total_cost,
                    status: row.status.parse().map_err(DomainError::Internal)?,
                    make: row.make,
                    model: row.model,
                    first_name: row.first_name,
                    last_name: row.last_name,
                })
            })
            .collect()
    }
}

/// An open PostgreSQL transaction
///
/// Dropping it without `commit` rolls back, which SeaORM guarantees for
/// `DatabaseTransaction`.
pub struct PostgresReservationTransaction {
    txn: DatabaseTransaction,
}

#[async_trait]
impl ReservationTransaction for PostgresReservationTransaction {
    async fn lock_car_for_update(
        &mut self,
        car_id: &CarId,
    ) -> Result<Option<CarAvailability>, DomainError> {
        let car = cars::Entity::find_by_id(car_id.0)
            .lock_exclusive()
            .one(&self.txn)
            .await
            .map_err(map_db_err)?;

        car.map(|model| Car::try_from(model).map(|car| car.availability())).transpose()
    }

    async fn insert_reservation(
        &mut self,
        reservation: &NewReservation,
    ) -> Result<Reservation, DomainError> {
        let model = reservations::ActiveModel {
            id: Set(Uuid::new_v4()),
            customer_id: Set(reservation.customer_id.0),
            car_id: Set(reservation.car_id.0),
            start_date: Set(reservation.start_date),
            end_date: Set(reservation.end_date),
            total_cost: Set(reservation.total_cost),
            status: Set(reservation.status.to_string()),
            created_at: Set(Some(Utc::now().fixed_offset())),
        };

        let result = model.insert(&self.txn).await.map_err(map_db_err)?;

        Reservation::try_from(result)
    }

    async fn update_car_status(
        &mut self,
        car_id: &CarId,
        status: CarStatus,
    ) -> Result<u64, DomainError> {
        let result = cars::Entity::update_many()
            .col_expr(cars::Column::Status, Expr::value(status.to_string()))
            .filter(cars::Column::Id.eq(car_id.0))
            .exec(&self.txn)
            .await
            .map_err(map_db_err)?;

        Ok(result.rows_affected)
    }

    async fn commit(self) -> Result<(), DomainError> {
        self.txn.commit().await.map_err(map_db_err)
    }

    async fn rollback(self) -> Result<(), DomainError> {
        self.txn.rollback().await.map_err(map_db_err)
    }
}

/// Convert SeaORM model to domain entity
impl TryFrom<reservations::Model> for Reservation {
    type Error = DomainError;

    fn try_from(model: reservations::Model) -> Result<Self, Self::Error> {
        Ok(Reservation {
            id: ReservationId(model.id),
            customer_id: CustomerId(model.customer_id),
            car_id: CarId(model.car_id),
            start_date: model.start_date,
            end_date: model.end_date,
            total_cost: model.total_cost,
            status: model.status.parse().map_err(DomainError::Internal)?,
            created_at: model
                .created_at
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or_else(Utc::now),
        })
    }
}
