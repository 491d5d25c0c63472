use axum::{middleware, routing::{get, post, put}, Router};
use std::sync::Arc;

use crate::handler::dish_handler::{
    create_dish_handler,
    delete_dish_handler,
    get_dish_handler,
    list_dishes_handler,
    patch_dish_handler,
    update_dish_handler,
};
use crate::handler::ingredient_handler::{
    create_ingredient_handler,
    delete_ingredient_handler,
    get_ingredient_handler,
    list_ingredients_handler,
    patch_ingredient_handler,
    update_ingredient_handler,
};
use crate::middlewares::auth_middleware::{require_auth, AuthState};
use crate::service::dish_service::DishServiceImpl;

pub fn dish_router(service: Arc<DishServiceImpl>, auth_state: Arc<AuthState>) -> Router {
    // Public read routes
    let public = Router::new()
        .route("/api/dishes", get(list_dishes_handler))
        .route("/api/dishes/{id}", get(get_dish_handler))
        .route("/api/dishes/{id}/ingredients", get(list_ingredients_handler))
        .route("/api/dishes/{id}/ingredients/{ingredient_id}", get(get_ingredient_handler));

    // Mutating routes behind the bearer token check
    let protected = Router::new()
        .route("/api/dishes", post(create_dish_handler))
        .route(
            "/api/dishes/{id}",
            put(update_dish_handler).patch(patch_dish_handler).delete(delete_dish_handler),
        )
        .route("/api/dishes/{id}/ingredients", post(create_ingredient_handler))
        .route(
            "/api/dishes/{id}/ingredients/{ingredient_id}",
            put(update_ingredient_handler)
                .patch(patch_ingredient_handler)
                .delete(delete_ingredient_handler),
        )
        .route_layer(middleware::from_fn_with_state(auth_state, require_auth));

    public
        .merge(protected)
        .with_state(service)
}
