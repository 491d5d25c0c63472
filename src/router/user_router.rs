use axum::{routing::post, Router};
use std::sync::Arc;

use crate::handler::user_handler::{login_handler, register_handler};
use crate::service::user_service::UserServiceImpl;

pub fn user_router(service: Arc<UserServiceImpl>) -> Router {
    Router::new()
        .route("/api/users", post(register_handler))
        .route("/api/users/login", post(login_handler))
        .with_state(service)
}
