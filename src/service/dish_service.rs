use std::sync::Arc;

use async_trait::async_trait;
use bson::oid::ObjectId;
use serde_json::Value;
use tracing::{error, info, instrument, warn};

use crate::model::dish::{Dish, Ingredient};
use crate::repository::dish_repo::DishRepository;
use crate::util::error::ServiceError;
use crate::validation::dish_validation::{parse_dish, parse_dish_patch, parse_ingredient, parse_ingredient_patch};

pub const DEFAULT_PAGE_COUNT: u64 = 5;
pub const MAX_PAGE_COUNT: u64 = 100;

const DISH_NOT_FOUND: &str = "Dish not found";
const INGREDIENT_NOT_FOUND: &str = "Ingredient not found";

#[derive(Debug, Clone)]
pub struct DishPage {
    pub dishes: Vec<Dish>,
    pub offset: u64,
    pub count: u64,
    pub total_count: u64,
}

#[async_trait]
pub trait DishService: Send + Sync {
    // Dish CRUD
    async fn create_dish(&self, payload: Value) -> Result<Dish, ServiceError>;
    async fn get_dish(&self, id: ObjectId) -> Result<Dish, ServiceError>;
    async fn list_dishes(&self, offset: Option<u64>, count: Option<u64>) -> Result<DishPage, ServiceError>;
    async fn search_dishes(&self, term: &str) -> Result<Vec<Dish>, ServiceError>;
    async fn update_dish(&self, id: ObjectId, payload: Value) -> Result<Dish, ServiceError>;
    async fn patch_dish(&self, id: ObjectId, payload: Value) -> Result<Dish, ServiceError>;
    async fn delete_dish(&self, id: ObjectId) -> Result<Dish, ServiceError>;

    // Ingredients embedded in a dish
    async fn list_ingredients(&self, dish_id: ObjectId) -> Result<Vec<Ingredient>, ServiceError>;
    async fn get_ingredient(&self, dish_id: ObjectId, id: ObjectId) -> Result<Ingredient, ServiceError>;
    async fn add_ingredient(&self, dish_id: ObjectId, payload: Value) -> Result<Ingredient, ServiceError>;
    async fn update_ingredient(&self, dish_id: ObjectId, id: ObjectId, payload: Value) -> Result<Dish, ServiceError>;
    async fn patch_ingredient(&self, dish_id: ObjectId, id: ObjectId, payload: Value) -> Result<Dish, ServiceError>;
    async fn remove_ingredient(&self, dish_id: ObjectId, id: ObjectId) -> Result<Dish, ServiceError>;
}

pub struct DishServiceImpl {
    pub dish_repo: Arc<dyn DishRepository>,
}

impl DishServiceImpl {
    pub fn new(dish_repo: Arc<dyn DishRepository>) -> Self {
        Self { dish_repo }
    }

    async fn load_dish(&self, id: ObjectId) -> Result<Dish, ServiceError> {
        match self.dish_repo.find_by_id(&id).await? {
            Some(dish) => Ok(dish),
            None => {
                warn!(dish_id = %id, "Dish not found");
                Err(ServiceError::NotFound(DISH_NOT_FOUND.to_string()))
            }
        }
    }

    async fn save(&self, dish: Dish) -> Result<Dish, ServiceError> {
        let res = self.dish_repo.replace(dish).await;
        if let Err(e) = &res {
            error!("Failed to save dish: {e}");
        }
        res.map_err(|e| match ServiceError::from(e) {
            // The dish vanished between load and save.
            ServiceError::NotFound(_) => ServiceError::NotFound(DISH_NOT_FOUND.to_string()),
            other => other,
        })
    }
}

fn invalid(errors: Vec<String>) -> ServiceError {
    ServiceError::InvalidInput(errors.join(", "))
}

#[async_trait]
impl DishService for DishServiceImpl {
    #[instrument(skip(self, payload))]
    async fn create_dish(&self, payload: Value) -> Result<Dish, ServiceError> {
        info!("Creating dish");
        let input = parse_dish(&payload).map_err(invalid)?;
        let dish = input.into_dish(ObjectId::new());
        let res = self.dish_repo.insert(dish).await;
        match &res {
            Ok(d) => info!(dish_id = %d.id, "Dish created successfully"),
            Err(e) => error!("Failed to create dish: {e}"),
        }
        res.map_err(ServiceError::from)
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn get_dish(&self, id: ObjectId) -> Result<Dish, ServiceError> {
        self.load_dish(id).await
    }

    #[instrument(skip(self))]
    async fn list_dishes(&self, offset: Option<u64>, count: Option<u64>) -> Result<DishPage, ServiceError> {
        let offset = offset.unwrap_or(0);
        let count = count.unwrap_or(DEFAULT_PAGE_COUNT);
        if count == 0 || count > MAX_PAGE_COUNT {
            return Err(ServiceError::InvalidInput(format!(
                "count must be between 1 and {}",
                MAX_PAGE_COUNT
            )));
        }

        let dishes = self.dish_repo.list(offset, count).await?;
        let total_count = self.dish_repo.count().await?;
        info!("Fetched {} of {} dishes", dishes.len(), total_count);
        Ok(DishPage {
            dishes,
            offset,
            count,
            total_count,
        })
    }

    #[instrument(skip(self))]
    async fn search_dishes(&self, term: &str) -> Result<Vec<Dish>, ServiceError> {
        let dishes = self.dish_repo.search_by_name(term).await?;
        info!("Search for '{}' matched {} dishes", term, dishes.len());
        Ok(dishes)
    }

    #[instrument(skip(self, payload), fields(id = %id))]
    async fn update_dish(&self, id: ObjectId, payload: Value) -> Result<Dish, ServiceError> {
        info!("Replacing dish");
        let input = parse_dish(&payload).map_err(invalid)?;
        // Full replace: optional fields missing from the body are cleared.
        let mut dish = self.load_dish(id).await?;
        dish.name = input.name;
        dish.category = input.category;
        dish.country = input.country;
        dish.price = input.price;
        dish.ingredients = input.ingredients.into_iter().map(|i| i.into_ingredient()).collect();
        self.save(dish).await
    }

    #[instrument(skip(self, payload), fields(id = %id))]
    async fn patch_dish(&self, id: ObjectId, payload: Value) -> Result<Dish, ServiceError> {
        info!("Patching dish");
        let patch = parse_dish_patch(&payload).map_err(invalid)?;
        let mut dish = self.load_dish(id).await?;
        patch.apply(&mut dish);
        self.save(dish).await
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn delete_dish(&self, id: ObjectId) -> Result<Dish, ServiceError> {
        info!("Deleting dish");
        match self.dish_repo.delete(&id).await? {
            Some(dish) => {
                info!(ingredients = dish.ingredients.len(), "Dish deleted with its ingredients");
                Ok(dish)
            }
            None => Err(ServiceError::NotFound(DISH_NOT_FOUND.to_string())),
        }
    }

    #[instrument(skip(self), fields(dish_id = %dish_id))]
    async fn list_ingredients(&self, dish_id: ObjectId) -> Result<Vec<Ingredient>, ServiceError> {
        Ok(self.load_dish(dish_id).await?.ingredients)
    }

    #[instrument(skip(self), fields(dish_id = %dish_id, id = %id))]
    async fn get_ingredient(&self, dish_id: ObjectId, id: ObjectId) -> Result<Ingredient, ServiceError> {
        let dish = self.load_dish(dish_id).await?;
        dish.ingredient(&id)
            .cloned()
            .ok_or_else(|| ServiceError::NotFound(INGREDIENT_NOT_FOUND.to_string()))
    }

    #[instrument(skip(self, payload), fields(dish_id = %dish_id))]
    async fn add_ingredient(&self, dish_id: ObjectId, payload: Value) -> Result<Ingredient, ServiceError> {
        info!("Adding ingredient");
        let input = parse_ingredient(&payload).map_err(invalid)?;
        let mut dish = self.load_dish(dish_id).await?;
        let ingredient = input.into_ingredient();
        dish.ingredients.push(ingredient.clone());
        self.save(dish).await?;
        info!(ingredient_id = %ingredient.id, "Ingredient added successfully");
        Ok(ingredient)
    }

    #[instrument(skip(self, payload), fields(dish_id = %dish_id, id = %id))]
    async fn update_ingredient(&self, dish_id: ObjectId, id: ObjectId, payload: Value) -> Result<Dish, ServiceError> {
        info!("Replacing ingredient");
        let input = parse_ingredient(&payload).map_err(invalid)?;
        let mut dish = self.load_dish(dish_id).await?;
        let ingredient = dish
            .ingredient_mut(&id)
            .ok_or_else(|| ServiceError::NotFound(INGREDIENT_NOT_FOUND.to_string()))?;
        ingredient.name = input.name;
        ingredient.amount = input.amount;
        ingredient.unit = input.unit;
        self.save(dish).await
    }

    #[instrument(skip(self, payload), fields(dish_id = %dish_id, id = %id))]
    async fn patch_ingredient(&self, dish_id: ObjectId, id: ObjectId, payload: Value) -> Result<Dish, ServiceError> {
        info!("Patching ingredient");
        let patch = parse_ingredient_patch(&payload).map_err(invalid)?;
        let mut dish = self.load_dish(dish_id).await?;
        let ingredient = dish
            .ingredient_mut(&id)
            .ok_or_else(|| ServiceError::NotFound(INGREDIENT_NOT_FOUND.to_string()))?;
        patch.apply(ingredient);
        self.save(dish).await
    }

    #[instrument(skip(self), fields(dish_id = %dish_id, id = %id))]
    async fn remove_ingredient(&self, dish_id: ObjectId, id: ObjectId) -> Result<Dish, ServiceError> {
        info!("Removing ingredient");
        let mut dish = self.load_dish(dish_id).await?;
        if dish.remove_ingredient(&id).is_none() {
            return Err(ServiceError::NotFound(INGREDIENT_NOT_FOUND.to_string()));
        }
        self.save(dish).await
    }
}
