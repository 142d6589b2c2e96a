//! PostgreSQL adapter for CarRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use super::map_db_err;
use crate::domain::entities::{Car, CarId, CarStatus, CarUpdate, NewCar};
use crate::domain::ports::CarRepository;
use crate::entity::cars;
use crate::error::DomainError;

/// PostgreSQL implementation of CarRepository
pub struct PostgresCarRepository {
    db: DatabaseConnection,
}

impl PostgresCarRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CarRepository for PostgresCarRepository {
    async fn find_by_id(&self, id: &CarId) -> Result<Option<Car>, DomainError> {
        let result = cars::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        result.map(Car::try_from).transpose()
    }

    async fn find_available(&self) -> Result<Vec<Car>, DomainError> {
        let results = cars::Entity::find()
            .filter(cars::Column::Status.eq(CarStatus::Available.to_string()))
            .order_by_asc(cars::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        results.into_iter().map(Car::try_from).collect()
    }

    async fn find_all(&self) -> Result<Vec<Car>, DomainError> {
        let results = cars::Entity::find()
            .order_by_asc(cars::Column::CreatedAt)
            .order_by_asc(cars::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        results.into_iter().map(Car::try_from).collect()
    }

    async fn create(&self, car: &NewCar) -> Result<Car, DomainError> {
        let model = cars::ActiveModel {
            id: Set(Uuid::new_v4()),
            make: Set(car.make.clone()),
            model_name: Set(car.model.clone()),
            year: Set(car.year),
            license_plate: Set(car.license_plate.clone()),
            daily_rate: Set(car.daily_rate),
            location_id: Set(car.location_id),
            status: Set(car.status.to_string()),
            created_at: Set(Some(Utc::now().fixed_offset())),
        };

        let result = model.insert(&self.db).await.map_err(map_db_err)?;

        Car::try_from(result)
    }

    async fn update(&self, id: &CarId, update: &CarUpdate) -> Result<u64, DomainError> {
        let result = cars::Entity::update_many()
            .col_expr(cars::Column::DailyRate, Expr::value(update.daily_rate))
            .col_expr(cars::Column::Status, Expr::value(update.status.to_string()))
            .col_expr(cars::Column::LocationId, Expr::value(update.location_id))
            .filter(cars::Column::Id.eq(id.0))
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.rows_affected)
    }
}

/// Convert SeaORM model to domain entity
///
/// Fails only if the row holds a status the schema's CHECK should have
/// rejected.
impl TryFrom<cars::Model> for Car {
    type Error = DomainError;

    fn try_from(model: cars::Model) -> Result<Self, Self::Error> {
        let status = model.status.parse().map_err(DomainError::Internal)?;

        Ok(Car {
            id: CarId(model.id),
            make: model.make,
            model: model.model_name,
            year: model.year,
            license_plate: model.license_plate,
            daily_rate: model.daily_rate,
            location_id: model.location_id,
            status,
            created_at: model
                .created_at
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or_else(Utc::now),
        })
    }
}
