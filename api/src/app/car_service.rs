//! Car service
//!
//! Inventory listing and administration.

use std::sync::Arc;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::entities::{Car, CarId, CarStatus, CarUpdate, NewCar};
use crate::domain::ports::CarRepository;
use crate::error::{AppError, DomainError};

/// Input for adding a car
#[derive(Debug, Clone, Default)]
pub struct CarDraft {
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub license_plate: Option<String>,
    pub daily_rate: Option<Decimal>,
    pub location_id: Option<Uuid>,
    pub status: Option<String>,
}

/// Input for updating a car
#[derive(Debug, Clone, Default)]
pub struct CarChanges {
    pub daily_rate: Option<Decimal>,
    pub status: Option<String>,
    pub location_id: Option<Uuid>,
}

/// Service for the car inventory
pub struct CarService<CR>
where
    CR: CarRepository,
{
    cars: Arc<CR>,
}

impl<CR> CarService<CR>
where
    CR: CarRepository,
{
    pub fn new(cars: Arc<CR>) -> Self {
        Self { cars }
    }

    /// Cars customers can book right now
    pub async fn list_available(&self) -> Result<Vec<Car>, AppError> {
        Ok(self.cars.find_available().await?)
    }

    /// Every car regardless of status
    pub async fn list_all(&self) -> Result<Vec<Car>, AppError> {
        Ok(self.cars.find_all().await?)
    }

    pub async fn get(&self, id: &CarId) -> Result<Car, AppError> {
        self.cars
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Car not found."))
    }

    /// Add a car to the inventory
    ///
    /// Status defaults to Available.
    pub async fn add(&self, draft: &CarDraft) -> Result<Car, AppError> {
        let (Some(make), Some(model), Some(license_plate), Some(daily_rate)) = (
            present(&draft.make),
            present(&draft.model),
            present(&draft.license_plate),
            draft.daily_rate,
        ) else {
            return Err(AppError::validation("Missing required fields for car."));
        };
        let daily_rate = positive_rate(daily_rate)?;

        let status = match present(&draft.status) {
            Some(s) => parse_status(s)?,
            None => CarStatus::Available,
        };

        let new_car = NewCar {
            make: make.to_string(),
            model: model.to_string(),
            year: draft.year,
            license_plate: license_plate.to_uppercase(),
            daily_rate,
            location_id: draft.location_id,
            status,
        };

        let car = self.cars.create(&new_car).await.map_err(|e| match e {
            DomainError::DuplicateKey(_) => AppError::conflict("License plate already exists."),
            DomainError::ReferentialIntegrity(_) => AppError::not_found("Location not found."),
            e => AppError::Domain(e),
        })?;

        tracing::info!(car_id = %car.id, license_plate = %car.license_plate, "Car added");
        Ok(car)
    }

    /// Change a car's rate, status and location
    pub async fn update(&self, id: &CarId, changes: &CarChanges) -> Result<(), AppError> {
        let (Some(daily_rate), Some(status)) = (changes.daily_rate, present(&changes.status))
        else {
            return Err(AppError::validation(
                "Missing required fields for update (daily_rate, status).",
            ));
        };

        let update = CarUpdate {
            daily_rate: positive_rate(daily_rate)?,
            status: parse_status(status)?,
            location_id: changes.location_id,
        };

        let updated = self.cars.update(id, &update).await.map_err(|e| match e {
            DomainError::ReferentialIntegrity(_) => AppError::not_found("Location not found."),
            e => AppError::Domain(e),
        })?;

        if updated == 0 {
            return Err(AppError::not_found("Car not found or no changes made."));
        }

        tracing::info!(car_id = %id, status = %update.status, "Car updated");
        Ok(())
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn positive_rate(rate: Decimal) -> Result<Decimal, AppError> {
    if rate <= Decimal::ZERO {
        return Err(AppError::validation("Daily rate must be greater than zero."));
    }
    Ok(rate)
}

fn parse_status(value: &str) -> Result<CarStatus, AppError> {
    value
        .parse()
        .map_err(|_| AppError::validation("Invalid status value provided."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{test_car, test_car_with_status, InMemoryRentalStore};

    fn create_service(store: InMemoryRentalStore) -> CarService<InMemoryRentalStore> {
        CarService::new(Arc::new(store))
    }

    fn draft(plate: &str) -> CarDraft {
        CarDraft {
            make: Some("Honda".to_string()),
            model: Some("Civic".to_string()),
            year: Some(2021),
            license_plate: Some(plate.to_string()),
            daily_rate: Some(Decimal::new(4500, 2)),
            location_id: None,
            status: None,
        }
    }

    #[tokio::test]
    async fn list_available_skips_rented_and_maintenance() {
        let available = test_car(Decimal::from(40));
        let store = InMemoryRentalStore::new()
            .with_car(available.clone())
            .with_car(test_car_with_status(Decimal::from(40), CarStatus::Rented))
            .with_car(test_car_with_status(Decimal::from(40), CarStatus::Maintenance));
        let service = create_service(store);

        let cars = service.list_available().await.unwrap();
        assert_eq!(cars.len(), 1);
        assert_eq!(cars[0].id, available.id);

        let all = service.list_all().await.unwrap();
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn get_unknown_car_is_not_found() {
        let service = create_service(InMemoryRentalStore::new());

        let err = service.get(&CarId::new()).await.unwrap_err();

        assert!(matches!(err, AppError::Domain(DomainError::NotFound(_))));
    }

    #[tokio::test]
    async fn add_defaults_to_available() {
        let service = create_service(InMemoryRentalStore::new());

        let car = service.add(&draft("abc123")).await.unwrap();

        assert_eq!(car.status, CarStatus::Available);
        assert_eq!(car.license_plate, "ABC123");
        assert_eq!(service.get(&car.id).await.unwrap().make, "Honda");
    }

    #[tokio::test]
    async fn add_rejects_duplicate_plate() {
        let service = create_service(InMemoryRentalStore::new());
        service.add(&draft("ABC123")).await.unwrap();

        let err = service.add(&draft("abc123")).await.unwrap_err();

        assert!(err.to_string().contains("License plate already exists"));
    }

    #[tokio::test]
    async fn add_rejects_missing_and_invalid_fields() {
        let service = create_service(InMemoryRentalStore::new());

        let mut missing = draft("XYZ1");
        missing.daily_rate = None;
        assert!(matches!(
            service.add(&missing).await,
            Err(AppError::Domain(DomainError::Validation(_)))
        ));

        let mut zero_rate = draft("XYZ2");
        zero_rate.daily_rate = Some(Decimal::ZERO);
        assert!(service.add(&zero_rate).await.is_err());

        let mut bad_status = draft("XYZ3");
        bad_status.status = Some("Scrapped".to_string());
        let err = service.add(&bad_status).await.unwrap_err();
        assert!(err.to_string().contains("Invalid status"));
    }

    #[tokio::test]
    async fn update_changes_rate_and_status() {
        let car = test_car(Decimal::from(40));
        let service = create_service(InMemoryRentalStore::new().with_car(car.clone()));

        service
            .update(
                &car.id,
                &CarChanges {
                    daily_rate: Some(Decimal::from(55)),
                    status: Some("Maintenance".to_string()),
                    location_id: None,
                },
            )
            .await
            .unwrap();

        let updated = service.get(&car.id).await.unwrap();
        assert_eq!(updated.daily_rate, Decimal::from(55));
        assert_eq!(updated.status, CarStatus::Maintenance);
    }

    #[tokio::test]
    async fn update_rejects_invalid_status() {
        let car = test_car(Decimal::from(40));
        let service = create_service(InMemoryRentalStore::new().with_car(car.clone()));

        let err = service
            .update(
                &car.id,
                &CarChanges {
                    daily_rate: Some(Decimal::from(55)),
                    status: Some("Borrowed".to_string()),
                    location_id: None,
                },
            )
            .await
            .unwrap_err();

        assert!(err.to_string().contains("Invalid status value provided."));
    }

    #[tokio::test]
    async fn update_unknown_car_is_not_found() {
        let service = create_service(InMemoryRentalStore::new());

        let err = service
            .update(
                &CarId::new(),
                &CarChanges {
                    daily_rate: Some(Decimal::from(55)),
                    status: Some("Available".to_string()),
                    location_id: None,
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Domain(DomainError::NotFound(_))));
    }
}
