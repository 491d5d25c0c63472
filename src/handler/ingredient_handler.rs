use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::Value;

use crate::dto::dish_dto::{DishMessageResponse, IngredientListResponse, IngredientMessageResponse, IngredientResponse};
use crate::handler::{parse_dish_id, parse_ingredient_id};
use crate::service::dish_service::{DishService, DishServiceImpl};
use crate::util::error::HandlerError;

pub async fn list_ingredients_handler(
    State(service): State<Arc<DishServiceImpl>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let Path(dish_id) = path?;
    let dish_id = parse_dish_id(&dish_id)?;
    let ingredients = service.list_ingredients(dish_id).await?;
    Ok(Json(IngredientListResponse {
        ingredients: ingredients.into_iter().map(IngredientResponse::from).collect(),
    }))
}

pub async fn get_ingredient_handler(
    State(service): State<Arc<DishServiceImpl>>,
    path: Result<Path<(String, String)>, PathRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let Path((dish_id, id)) = path?;
    let dish_id = parse_dish_id(&dish_id)?;
    let id = parse_ingredient_id(&id)?;
    let ingredient = service.get_ingredient(dish_id, id).await?;
    Ok(Json(IngredientResponse::from(ingredient)))
}

pub async fn create_ingredient_handler(
    State(service): State<Arc<DishServiceImpl>>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let Path(dish_id) = path?;
    let dish_id = parse_dish_id(&dish_id)?;
    let Json(payload) = payload?;
    let ingredient = service.add_ingredient(dish_id, payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(IngredientMessageResponse {
            message: "Ingredient created successfully".to_string(),
            ingredient: ingredient.into(),
        }),
    ))
}

pub async fn update_ingredient_handler(
    State(service): State<Arc<DishServiceImpl>>,
    path: Result<Path<(String, String)>, PathRejection>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let Path((dish_id, id)) = path?;
    let dish_id = parse_dish_id(&dish_id)?;
    let id = parse_ingredient_id(&id)?;
    let Json(payload) = payload?;
    let dish = service.update_ingredient(dish_id, id, payload).await?;
    Ok(Json(DishMessageResponse::new("Ingredient updated successfully", dish)))
}

pub async fn patch_ingredient_handler(
    State(service): State<Arc<DishServiceImpl>>,
    path: Result<Path<(String, String)>, PathRejection>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let Path((dish_id, id)) = path?;
    let dish_id = parse_dish_id(&dish_id)?;
    let id = parse_ingredient_id(&id)?;
    let Json(payload) = payload?;
    let dish = service.patch_ingredient(dish_id, id, payload).await?;
    Ok(Json(DishMessageResponse::new("Ingredient updated successfully", dish)))
}

pub async fn delete_ingredient_handler(
    State(service): State<Arc<DishServiceImpl>>,
    path: Result<Path<(String, String)>, PathRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    let Path((dish_id, id)) = path?;
    let dish_id = parse_dish_id(&dish_id)?;
    let id = parse_ingredient_id(&id)?;
    let dish = service.remove_ingredient(dish_id, id).await?;
    Ok(Json(DishMessageResponse::new("Ingredient deleted successfully", dish)))
}
