//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod cars;
pub mod customers;
pub mod reservations;

use axum::extract::FromRequest;

use crate::error::AppError;

pub use cars::{create_car, get_car, list_all_cars, list_available_cars, update_car};
pub use customers::{login, register};
pub use reservations::{create_reservation, list_reservations};

/// `Json` extractor whose rejections use the API's error body
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
