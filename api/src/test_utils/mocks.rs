//! Mock implementations of port traits
//!
//! These are in-memory implementations that can be configured for testing.
//! They store data in memory and allow tests to verify behavior.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use tokio::sync::OwnedMutexGuard;

use crate::domain::entities::{
    Car, CarAvailability, CarId, CarStatus, CarUpdate, Customer, CustomerId, NewCar, NewCustomer,
    NewReservation, Reservation, ReservationId, ReservationSummary,
};
use crate::domain::ports::{
    CarRepository, CustomerRepository, ReservationRepository, ReservationTransaction,
};
use crate::error::DomainError;

// ============================================================================
// In-Memory Rental Store
// ============================================================================

#[derive(Default)]
struct StoreData {
    customers: HashMap<CustomerId, Customer>,
    cars: HashMap<CarId, Car>,
    reservations: Vec<Reservation>,
}

#[derive(Default)]
struct Counters {
    begun: AtomicUsize,
    commits: AtomicUsize,
    rollbacks: AtomicUsize,
}

/// One store behind every repository port
///
/// Reservation transactions take a per-car `tokio::sync::Mutex` in place of
/// a row lock and buffer their writes until commit, so the in-memory store
/// behaves like `SELECT ... FOR UPDATE` under concurrency.
#[derive(Clone, Default)]
pub struct InMemoryRentalStore {
    data: Arc<RwLock<StoreData>>,
    car_locks: Arc<Mutex<HashMap<CarId, Arc<tokio::sync::Mutex<()>>>>>,
    counters: Arc<Counters>,
    fail_status_updates: Arc<AtomicBool>,
}

impl InMemoryRentalStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a customer for testing
    pub fn with_customer(self, customer: Customer) -> Self {
        self.data
            .write()
            .unwrap()
            .customers
            .insert(customer.id, customer);
        self
    }

    /// Pre-populate with a car for testing
    pub fn with_car(self, car: Car) -> Self {
        self.data.write().unwrap().cars.insert(car.id, car);
        self
    }

    /// Make `update_car_status` fail with a database error
    pub fn fail_car_status_updates(&self, fail: bool) {
        self.fail_status_updates.store(fail, Ordering::SeqCst);
    }

    /// Committed status of a car
    pub fn car_status(&self, id: &CarId) -> Option<CarStatus> {
        self.data.read().unwrap().cars.get(id).map(|c| c.status)
    }

    /// Number of committed reservations
    pub fn reservation_count(&self) -> usize {
        self.data.read().unwrap().reservations.len()
    }

    pub fn transactions_begun(&self) -> usize {
        self.counters.begun.load(Ordering::SeqCst)
    }

    pub fn commits(&self) -> usize {
        self.counters.commits.load(Ordering::SeqCst)
    }

    pub fn rollbacks(&self) -> usize {
        self.counters.rollbacks.load(Ordering::SeqCst)
    }

    fn car_lock(&self, id: &CarId) -> Arc<tokio::sync::Mutex<()>> {
        self.car_locks
            .lock()
            .unwrap()
            .entry(*id)
            .or_default()
            .clone()
    }
}

#[async_trait]
impl CustomerRepository for InMemoryRentalStore {
    async fn create(&self, new_customer: &NewCustomer) -> Result<Customer, DomainError> {
        let mut data = self.data.write().unwrap();
        if data
            .customers
            .values()
            .any(|c| c.email == new_customer.email)
        {
            return Err(DomainError::DuplicateKey(
                "customers_email_key".to_string(),
            ));
        }

        let customer = Customer {
            id: CustomerId::new(),
            first_name: new_customer.first_name.clone(),
            last_name: new_customer.last_name.clone(),
            email: new_customer.email.clone(),
            phone_number: new_customer.phone_number.clone(),
            driver_license_id: new_customer.driver_license_id.clone(),
            password_hash: new_customer.password_hash.clone(),
            created_at: Utc::now(),
        };
        data.customers.insert(customer.id, customer.clone());

        Ok(customer)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Customer>, DomainError> {
        let data = self.data.read().unwrap();
        Ok(data.customers.values().find(|c| c.email == email).cloned())
    }
}

#[async_trait]
impl CarRepository for InMemoryRentalStore {
    async fn find_by_id(&self, id: &CarId) -> Result<Option<Car>, DomainError> {
        Ok(self.data.read().unwrap().cars.get(id).cloned())
    }

    async fn find_available(&self) -> Result<Vec<Car>, DomainError> {
        let data = self.data.read().unwrap();
        let mut cars: Vec<_> = data
            .cars
            .values()
            .filter(|c| c.status.is_available())
            .cloned()
            .collect();
        cars.sort_by_key(|c| c.created_at);
        Ok(cars)
    }

    async fn find_all(&self) -> Result<Vec<Car>, DomainError> {
        let data = self.data.read().unwrap();
        let mut cars: Vec<_> = data.cars.values().cloned().collect();
        cars.sort_by_key(|c| c.created_at);
        Ok(cars)
    }

    async fn create(&self, new_car: &NewCar) -> Result<Car, DomainError> {
        let mut data = self.data.write().unwrap();
        if data
            .cars
            .values()
            .any(|c| c.license_plate == new_car.license_plate)
        {
            return Err(DomainError::DuplicateKey(
                "cars_license_plate_key".to_string(),
            ));
        }

        let car = Car {
            id: CarId::new(),
            make: new_car.make.clone(),
            model: new_car.model.clone(),
            year: new_car.year,
            license_plate: new_car.license_plate.clone(),
            daily_rate: new_car.daily_rate,
            location_id: new_car.location_id,
            status: new_car.status,
            created_at: Utc::now(),
        };
        data.cars.insert(car.id, car.clone());

        Ok(car)
    }

    async fn update(&self, id: &CarId, update: &CarUpdate) -> Result<u64, DomainError> {
        let mut data = self.data.write().unwrap();
        match data.cars.get_mut(id) {
            Some(car) => {
                car.daily_rate = update.daily_rate;
                car.status = update.status;
                car.location_id = update.location_id;
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

#[async_trait]
impl ReservationRepository for InMemoryRentalStore {
    type Transaction = InMemoryReservationTransaction;

    async fn begin(&self) -> Result<Self::Transaction, DomainError> {
        self.counters.begun.fetch_add(1, Ordering::SeqCst);
        Ok(InMemoryReservationTransaction {
            store: self.clone(),
            guards: Vec::new(),
            pending_reservations: Vec::new(),
            pending_statuses: HashMap::new(),
        })
    }

    async fn find_all_detailed(&self) -> Result<Vec<ReservationSummary>, DomainError> {
        let data = self.data.read().unwrap();
        let mut summaries: Vec<_> = data
            .reservations
            .iter()
            .filter_map(|r| {
                let car = data.cars.get(&r.car_id)?;
                let customer = data.customers.get(&r.customer_id)?;
                Some(ReservationSummary {
                    reservation_id: r.id,
                    start_date: r.start_date,
                    end_date: r.end_date,
                    total_cost: r.total_cost,
                    status: r.status,
                    make: car.make.clone(),
                    model: car.model.clone(),
                    first_name: customer.first_name.clone(),
                    last_name: customer.last_name.clone(),
                })
            })
            .collect();
        summaries.sort_by(|a, b| b.start_date.cmp(&a.start_date));
        Ok(summaries)
    }
}

/// Transaction over [`InMemoryRentalStore`]
///
/// Writes are buffered and applied on commit. Dropping it discards them and
/// releases the car locks.
pub struct InMemoryReservationTransaction {
    store: InMemoryRentalStore,
    guards: Vec<OwnedMutexGuard<()>>,
    pending_reservations: Vec<Reservation>,
    pending_statuses: HashMap<CarId, CarStatus>,
}

#[async_trait]
impl ReservationTransaction for InMemoryReservationTransaction {
    async fn lock_car_for_update(
        &mut self,
        car_id: &CarId,
    ) -> Result<Option<CarAvailability>, DomainError> {
        let lock = self.store.car_lock(car_id);
        self.guards.push(lock.lock_owned().await);

        let data = self.store.data.read().unwrap();
        Ok(data.cars.get(car_id).map(|car| {
            let mut availability = car.availability();
            if let Some(status) = self.pending_statuses.get(car_id) {
                availability.status = *status;
            }
            availability
        }))
    }

    async fn insert_reservation(
        &mut self,
        reservation: &NewReservation,
    ) -> Result<Reservation, DomainError> {
        {
            let data = self.store.data.read().unwrap();
            if !data.customers.contains_key(&reservation.customer_id) {
                return Err(DomainError::ReferentialIntegrity(
                    "reservations_customer_id_fkey".to_string(),
                ));
            }
            if !data.cars.contains_key(&reservation.car_id) {
                return Err(DomainError::ReferentialIntegrity(
                    "reservations_car_id_fkey".to_string(),
                ));
            }
        }

        let created = Reservation {
            id: ReservationId::new(),
            customer_id: reservation.customer_id,
            car_id: reservation.car_id,
            start_date: reservation.start_date,
            end_date: reservation.end_date,
            total_cost: reservation.total_cost,
            status: reservation.status,
            created_at: Utc::now(),
        };
        self.pending_reservations.push(created.clone());

        Ok(created)
    }

    async fn update_car_status(
        &mut self,
        car_id: &CarId,
        status: CarStatus,
    ) -> Result<u64, DomainError> {
        if self.store.fail_status_updates.load(Ordering::SeqCst) {
            return Err(DomainError::Database("connection reset by peer".to_string()));
        }

        let exists = self.store.data.read().unwrap().cars.contains_key(car_id);
        if !exists {
            return Ok(0);
        }
        self.pending_statuses.insert(*car_id, status);
        Ok(1)
    }

    async fn commit(self) -> Result<(), DomainError> {
        {
            let mut data = self.store.data.write().unwrap();
            for (car_id, status) in &self.pending_statuses {
                if let Some(car) = data.cars.get_mut(car_id) {
                    car.status = *status;
                }
            }
            data.reservations.extend(self.pending_reservations.iter().cloned());
        }
        self.store.counters.commits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn rollback(self) -> Result<(), DomainError> {
        self.store.counters.rollbacks.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
