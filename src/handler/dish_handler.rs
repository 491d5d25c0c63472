use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use tracing::info;

use crate::dto::dish_dto::{DishMessageResponse, DishPageResponse, DishResponse, DishSearchResponse, ListDishesQuery};
use crate::handler::parse_dish_id;
use crate::service::dish_service::{DishService, DishServiceImpl};
use crate::util::error::HandlerError;

pub async fn create_dish_handler(
    State(service): State<Arc<DishServiceImpl>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let Json(payload) = payload?;
    let dish = service.create_dish(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(DishMessageResponse::new("Dish created successfully", dish)),
    ))
}

/// Paged listing, or a name search when `search` is present and non-empty.
pub async fn list_dishes_handler(
    State(service): State<Arc<DishServiceImpl>>,
    query: Result<Query<ListDishesQuery>, QueryRejection>,
) -> Result<Response, HandlerError> {
    let Query(query) = query?;

    if let Some(term) = query.search.as_deref().filter(|t| !t.is_empty()) {
        info!("[list_dishes_handler] Searching dishes by name");
        let dishes = service.search_dishes(term).await?;
        let body = DishSearchResponse {
            dishes: dishes.into_iter().map(DishResponse::from).collect(),
        };
        return Ok(Json(body).into_response());
    }

    let page = service.list_dishes(query.offset, query.count).await?;
    let body = DishPageResponse {
        dishes: page.dishes.into_iter().map(DishResponse::from).collect(),
        offset: page.offset,
        count: page.count,
        total_count: page.total_count,
    };
    Ok(Json(body).into_response())
}

pub async fn get_dish_handler(
    State(service): State<Arc<DishServiceImpl>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let Path(id) = path?;
    let id = parse_dish_id(&id)?;
    let dish = service.get_dish(id).await?;
    Ok(Json(DishResponse::from(dish)))
}

pub async fn update_dish_handler(
    State(service): State<Arc<DishServiceImpl>>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let Path(id) = path?;
    let id = parse_dish_id(&id)?;
    let Json(payload) = payload?;
    let dish = service.update_dish(id, payload).await?;
    Ok(Json(DishMessageResponse::new("Dish updated successfully", dish)))
}

pub async fn patch_dish_handler(
    State(service): State<Arc<DishServiceImpl>>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let Path(id) = path?;
    let id = parse_dish_id(&id)?;
    let Json(payload) = payload?;
    let dish = service.patch_dish(id, payload).await?;
    Ok(Json(DishMessageResponse::new("Dish updated successfully", dish)))
}

pub async fn delete_dish_handler(
    State(service): State<Arc<DishServiceImpl>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let Path(id) = path?;
    let id = parse_dish_id(&id)?;
    let dish = service.delete_dish(id).await?;
    Ok(Json(DishMessageResponse::new("Dish deleted successfully", dish)))
}
