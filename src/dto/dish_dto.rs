use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::model::dish::{Dish, Ingredient};

// --- Validated inputs, produced by `validation::dish_validation` ---

#[derive(Debug, Clone, PartialEq)]
pub struct IngredientInput {
    pub name: String,
    pub amount: f64,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DishInput {
    pub name: String,
    pub category: Option<String>,
    pub country: Option<String>,
    pub price: f64,
    pub ingredients: Vec<IngredientInput>,
}

/// The single field a dish PATCH touches.
#[derive(Debug, Clone, PartialEq)]
pub enum DishPatch {
    Name(String),
    Category(Option<String>),
    Country(Option<String>),
    Price(f64),
    Ingredients(Vec<IngredientInput>),
}

/// The single field an ingredient PATCH touches.
#[derive(Debug, Clone, PartialEq)]
pub enum IngredientPatch {
    Name(String),
    Amount(f64),
    Unit(String),
}

impl IngredientInput {
    pub fn into_ingredient(self) -> Ingredient {
        Ingredient {
            id: ObjectId::new(),
            name: self.name,
            amount: self.amount,
            unit: self.unit,
        }
    }
}

impl DishInput {
    /// Builds the stored form, generating ids for the dish and every ingredient.
    pub fn into_dish(self, id: ObjectId) -> Dish {
        Dish {
            id,
            name: self.name,
            category: self.category,
            country: self.country,
            price: self.price,
            ingredients: self.ingredients.into_iter().map(IngredientInput::into_ingredient).collect(),
        }
    }
}

impl DishPatch {
    pub fn apply(self, dish: &mut Dish) {
        match self {
            DishPatch::Name(name) => dish.name = name,
            DishPatch::Category(category) => dish.category = category,
            DishPatch::Country(country) => dish.country = country,
            DishPatch::Price(price) => dish.price = price,
            DishPatch::Ingredients(ingredients) => {
                dish.ingredients = ingredients.into_iter().map(IngredientInput::into_ingredient).collect()
            }
        }
    }
}

impl IngredientPatch {
    pub fn apply(self, ingredient: &mut Ingredient) {
        match self {
            IngredientPatch::Name(name) => ingredient.name = name,
            IngredientPatch::Amount(amount) => ingredient.amount = amount,
            IngredientPatch::Unit(unit) => ingredient.unit = unit,
        }
    }
}

// --- Query parameters ---

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListDishesQuery {
    pub offset: Option<u64>,
    pub count: Option<u64>,
    pub search: Option<String>,
}

// --- Responses ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngredientResponse {
    pub id: String,
    pub name: String,
    pub amount: f64,
    pub unit: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DishResponse {
    pub id: String,
    pub name: String,
    pub category: Option<String>,
    pub country: Option<String>,
    pub price: f64,
    pub ingredients: Vec<IngredientResponse>,
}

impl From<Ingredient> for IngredientResponse {
    fn from(ingredient: Ingredient) -> Self {
        IngredientResponse {
            id: ingredient.id.to_hex(),
            name: ingredient.name,
            amount: ingredient.amount,
            unit: ingredient.unit,
        }
    }
}

impl From<Dish> for DishResponse {
    fn from(dish: Dish) -> Self {
        DishResponse {
            id: dish.id.to_hex(),
            name: dish.name,
            category: dish.category,
            country: dish.country,
            price: dish.price,
            ingredients: dish.ingredients.into_iter().map(IngredientResponse::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DishMessageResponse {
    pub message: String,
    pub dish: DishResponse,
}

impl DishMessageResponse {
    pub fn new(message: &str, dish: Dish) -> Self {
        DishMessageResponse {
            message: message.to_string(),
            dish: dish.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct IngredientMessageResponse {
    pub message: String,
    pub ingredient: IngredientResponse,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DishPageResponse {
    pub dishes: Vec<DishResponse>,
    pub offset: u64,
    pub count: u64,
    pub total_count: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DishSearchResponse {
    pub dishes: Vec<DishResponse>,
}

#[derive(Debug, Clone, Serialize)]
pub struct IngredientListResponse {
    pub ingredients: Vec<IngredientResponse>,
}
