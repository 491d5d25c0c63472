pub mod dish_router;
pub mod user_router;

use axum::{routing::get, Router};
use std::sync::Arc;

use crate::middlewares::auth_middleware::AuthState;
use crate::service::{dish_service::DishServiceImpl, user_service::UserServiceImpl};

/// Every HTTP route the service exposes, without the outer tower layers.
pub fn api_router(
    dish_service: Arc<DishServiceImpl>,
    user_service: Arc<UserServiceImpl>,
    auth_state: Arc<AuthState>,
) -> Router {
    Router::new()
        .merge(dish_router::dish_router(dish_service, auth_state))
        .merge(user_router::user_router(user_service))
        .route("/health", get(|| async { "OK" }))
}
