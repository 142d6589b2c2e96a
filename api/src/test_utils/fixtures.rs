//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.
//! Each fixture function creates a valid entity that can be customized.

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::entities::{Car, CarId, CarStatus, Customer, CustomerId};

/// Password that `test_customer`'s hash was made from
pub const TEST_PASSWORD: &str = "correct horse battery staple";

/// Create a test customer with default values
///
/// The password hash uses the minimum bcrypt cost to keep tests fast.
pub fn test_customer() -> Customer {
    let unique = &Uuid::new_v4().to_string()[..8];
    Customer {
        id: CustomerId::new(),
        first_name: "Ada".to_string(),
        last_name: Some("Lovelace".to_string()),
        email: format!("ada-{}@example.com", unique),
        phone_number: Some("555-0100".to_string()),
        driver_license_id: format!("DL-{}", unique),
        password_hash: bcrypt::hash(TEST_PASSWORD, 4).unwrap(),
        created_at: Utc::now(),
    }
}

/// Create an available test car with the given daily rate
pub fn test_car(daily_rate: Decimal) -> Car {
    test_car_with_status(daily_rate, CarStatus::Available)
}

/// Create a test car with a specific status
pub fn test_car_with_status(daily_rate: Decimal, status: CarStatus) -> Car {
    let plate = Uuid::new_v4().simple().to_string()[..7].to_uppercase();
    Car {
        id: CarId::new(),
        make: "Toyota".to_string(),
        model: "Corolla".to_string(),
        year: Some(2022),
        license_plate: plate,
        daily_rate,
        location_id: None,
        status,
        created_at: Utc::now(),
    }
}
