use axum::{
    extract::{Extension, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

use crate::domain::models::user::User;
use crate::domain::services::auth_service::{AuthResult, AuthService};
use crate::error::AppError;
use crate::server::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/check-status", get(check_status))
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    #[validate(length(min = 1, message = "Full name cannot be empty"))]
    pub full_name: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<AuthResult>, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let auth_service = AuthService::new(state.clone());
    let result = auth_service
        .register(&payload.email, &payload.password, &payload.full_name)
        .await?;

    Ok(Json(result))
}

async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResult>, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let auth_service = AuthService::new(state.clone());
    let result = auth_service.login(&payload.email, &payload.password).await?;

    Ok(Json(result))
}

/// Re-issues a token for the already-authenticated caller.
async fn check_status(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
) -> Result<Json<AuthResult>, AppError> {
    let auth_service = AuthService::new(state.clone());
    let result = auth_service.check_status(user)?;

    Ok(Json(result))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_rejects_bad_email_and_short_password() {
        let request = RegisterRequest {
            email: "not-an-email".into(),
            password: "short".into(),
            full_name: "Someone".into(),
        };
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn login_accepts_valid_credentials_shape() {
        let request = LoginRequest {
            email: "someone@example.com".into(),
            password: "Abc123456".into(),
        };
        assert!(request.validate().is_ok());
    }
}
