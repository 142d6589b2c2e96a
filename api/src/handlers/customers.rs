//! Customer handlers
//!
//! Endpoints for customer registration and login.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::app::Registration;
use super::AppJson;
use crate::error::AppError;
use crate::AppState;

/// Request body for customer registration
#[derive(Debug, Default, Deserialize)]
pub struct RegisterRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Driver license number
    pub license: Option<String>,
    pub password: Option<String>,
}

impl From<RegisterRequest> for Registration {
    fn from(body: RegisterRequest) -> Self {
        Registration {
            first_name: body.first_name,
            last_name: body.last_name,
            email: body.email,
            phone: body.phone,
            license: body.license,
            password: body.password,
        }
    }
}

/// Plain acknowledgement
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Request body for login
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Response body for a successful login
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub customer_id: String,
    pub first_name: String,
}

/// POST /api/register
pub async fn register(
    State(state): State<AppState>,
    AppJson(request): AppJson<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    state.customer_service.register(&request.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Customer registered successfully!".to_string(),
        }),
    ))
}

/// POST /api/login
///
/// Verifies credentials and returns the customer's id. No session is issued.
pub async fn login(
    State(state): State<AppState>,
    AppJson(request): AppJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let customer = state
        .customer_service
        .login(request.email.as_deref(), request.password.as_deref())
        .await?;

    Ok(Json(LoginResponse {
        message: "Login successful!".to_string(),
        customer_id: customer.id.to_string(),
        first_name: customer.first_name,
    }))
}
