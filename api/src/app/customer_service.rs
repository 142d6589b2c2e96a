//! Customer service
//!
//! Handles customer registration and credential checks.

use std::sync::{Arc, OnceLock};

use regex::Regex;

use crate::domain::entities::{Customer, NewCustomer};
use crate::domain::ports::CustomerRepository;
use crate::error::{AppError, DomainError};

/// Registration input, as received from a client
#[derive(Debug, Clone, Default)]
pub struct Registration {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub license: Option<String>,
    pub password: Option<String>,
}

/// Service for managing customers
pub struct CustomerService<CR>
where
    CR: CustomerRepository,
{
    customers: Arc<CR>,
    bcrypt_cost: u32,
}

impl<CR> CustomerService<CR>
where
    CR: CustomerRepository,
{
    pub fn new(customers: Arc<CR>, bcrypt_cost: u32) -> Self {
        Self {
            customers,
            bcrypt_cost,
        }
    }

    /// Register a new customer
    ///
    /// First name, email, license and password are required.
    pub async fn register(&self, registration: &Registration) -> Result<Customer, AppError> {
        let (Some(first_name), Some(email), Some(license), Some(password)) = (
            present(&registration.first_name),
            present(&registration.email),
            present(&registration.license),
            registration.password.as_deref().filter(|p| !p.is_empty()),
        ) else {
            return Err(AppError::validation("Missing required fields."));
        };

        let email = email.to_lowercase();
        if !email_regex().is_match(&email) {
            return Err(AppError::validation("Invalid email address."));
        }

        let password_hash = hash_password(password.to_string(), self.bcrypt_cost).await?;

        let new_customer = NewCustomer {
            first_name: first_name.to_string(),
            last_name: present(&registration.last_name).map(str::to_string),
            email,
            phone_number: present(&registration.phone).map(str::to_string),
            driver_license_id: license.to_string(),
            password_hash,
        };

        let customer = self
            .customers
            .create(&new_customer)
            .await
            .map_err(|e| match e {
                DomainError::DuplicateKey(_) => AppError::conflict("Email already in use."),
                e => AppError::Domain(e),
            })?;

        tracing::info!(customer_id = %customer.id, "Customer registered");
        Ok(customer)
    }

    /// Check an email/password pair
    ///
    /// Unknown email and wrong password give the same error.
    pub async fn login(
        &self,
        email: Option<&str>,
        password: Option<&str>,
    ) -> Result<Customer, AppError> {
        let (Some(email), Some(password)) = (
            email.map(str::trim).filter(|e| !e.is_empty()),
            password.filter(|p| !p.is_empty()),
        ) else {
            return Err(AppError::validation("Email and password are required."));
        };

        let invalid = || {
            AppError::Domain(DomainError::Unauthorized(
                "Invalid email or password.".to_string(),
            ))
        };

        let customer = self
            .customers
            .find_by_email(&email.to_lowercase())
            .await?
            .ok_or_else(invalid)?;

        if !verify_password(password.to_string(), customer.password_hash.clone()).await? {
            tracing::debug!(customer_id = %customer.id, "Password mismatch");
            return Err(invalid());
        }

        Ok(customer)
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex is valid")
    })
}

/// bcrypt is CPU-bound, so it runs off the async workers
async fn hash_password(password: String, cost: u32) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| AppError::Internal(format!("Hashing task failed: {}", e)))?
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))
}

async fn verify_password(password: String, hash: String) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| AppError::Internal(format!("Verification task failed: {}", e)))?
        .map_err(|e| AppError::Internal(format!("Password verification failed: {}", e)))
}
