use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tracing::warn;
use validator::Validate;

use crate::dto::user_dto::{CredentialsRequest, UserCreatedResponse};
use crate::service::user_service::{UserService, UserServiceImpl};
use crate::util::error::HandlerError;

fn check_credentials(payload: &CredentialsRequest) -> Result<(), HandlerError> {
    if !payload.is_complete() {
        return Err(HandlerError::bad_request("All fields are required"));
    }
    if let Err(e) = payload.validate() {
        warn!("Credential validation failed: {}", e);
        return Err(HandlerError::bad_request(format!("Validation error: {}", e)));
    }
    Ok(())
}

// Register
pub async fn register_handler(
    State(service): State<Arc<UserServiceImpl>>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let Json(payload) = payload?;
    check_credentials(&payload)?;
    let user = service.register(payload.email, payload.password).await?;
    Ok((
        StatusCode::CREATED,
        Json(UserCreatedResponse {
            message: "User created successfully".to_string(),
            user,
        }),
    ))
}

// Login
pub async fn login_handler(
    State(service): State<Arc<UserServiceImpl>>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let Json(payload) = payload?;
    if !payload.is_complete() {
        return Err(HandlerError::bad_request("All fields are required"));
    }
    let res = service.login(payload.email, payload.password).await?;
    Ok(Json(res))
}
