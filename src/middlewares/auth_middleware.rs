use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, Request},
    middleware::Next,
    response::Response,
};
use tracing::warn;

use crate::util::error::HandlerError;
use crate::util::jwt::{JwtTokenUtils, JwtTokenUtilsImpl};

pub struct AuthState {
    pub jwt_utils: Arc<JwtTokenUtilsImpl>,
    /// When false every request passes through untouched.
    pub auth_required: bool,
}

/// Guards the mutating dish and ingredient routes. On success the validated
/// `Claims` are attached to the request extensions.
pub async fn require_auth(
    State(state): State<Arc<AuthState>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, HandlerError> {
    if !state.auth_required {
        return Ok(next.run(req).await);
    }

    let auth_header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            warn!("Request without authorization header");
            HandlerError::unauthorized("Authentication required")
        })?;

    let token = state
        .jwt_utils
        .extract_token_from_header(auth_header)
        .map_err(|_| HandlerError::unauthorized("Authentication required"))?;

    let claims = state.jwt_utils.validate_access_token(&token).map_err(|e| {
        warn!("Rejected access token: {}", e);
        HandlerError::unauthorized("Authentication error")
    })?;

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}
