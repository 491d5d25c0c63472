use bson::oid::ObjectId;
use tracing::{info, instrument};

use crate::model::dish::{Dish, Ingredient};
use crate::repository::dish_repo::DishRepository;
use crate::repository::repository_error::RepositoryResult;

type SampleIngredient = (&'static str, f64, &'static str);

const SPAGHETTI: SampleIngredient = ("Spaghetti", 200.0, "grams");
const BACON: SampleIngredient = ("Bacon", 100.0, "grams");
const PARMESAN: SampleIngredient = ("Parmesan Cheese", 50.0, "grams");
const EGGS: SampleIngredient = ("Eggs", 2.0, "units");
const OLIVE_OIL: SampleIngredient = ("Olive Oil", 1.0, "tablespoon");
const GARLIC: SampleIngredient = ("Garlic", 2.0, "cloves");
const TOMATOES: SampleIngredient = ("Tomatoes", 4.0, "units");
const ONION: SampleIngredient = ("Onion", 1.0, "unit");
const CHICKEN: SampleIngredient = ("Chicken Breast", 250.0, "grams");
const RICE: SampleIngredient = ("Rice", 200.0, "grams");
const SOY_SAUCE: SampleIngredient = ("Soy Sauce", 2.0, "tablespoons");
const GINGER: SampleIngredient = ("Ginger", 1.0, "teaspoon");
const CARROTS: SampleIngredient = ("Carrots", 2.0, "units");
const BELL_PEPPER: SampleIngredient = ("Bell Pepper", 1.0, "unit");
const BEEF: SampleIngredient = ("Beef", 300.0, "grams");
const POTATOES: SampleIngredient = ("Potatoes", 3.0, "units");
const BUTTER: SampleIngredient = ("Butter", 2.0, "tablespoons");
const MILK: SampleIngredient = ("Milk", 200.0, "ml");
const FLOUR: SampleIngredient = ("Flour", 100.0, "grams");
const SALT: SampleIngredient = ("Salt", 1.0, "teaspoon");
const PEPPER: SampleIngredient = ("Pepper", 1.0, "teaspoon");

const SAMPLE_DISHES: [(&str, &str, &str, [SampleIngredient; 6]); 5] = [
    ("Spaghetti Carbonara", "Pasta", "Italy", [SPAGHETTI, BACON, PARMESAN, EGGS, OLIVE_OIL, GARLIC]),
    ("Chicken Fried Rice", "Rice Dish", "China", [CHICKEN, RICE, SOY_SAUCE, GINGER, CARROTS, BELL_PEPPER]),
    ("Beef Stroganoff", "Meat Dish", "Russia", [BEEF, TOMATOES, ONION, OLIVE_OIL, SALT, PEPPER]),
    ("Mashed Potatoes", "Side Dish", "USA", [POTATOES, BUTTER, MILK, FLOUR, SALT, PEPPER]),
    ("Vegetable Stir Fry", "Vegetable Dish", "Thailand", [RICE, CARROTS, BELL_PEPPER, OLIVE_OIL, GARLIC, SOY_SAUCE]),
];

pub fn sample_dishes() -> Vec<Dish> {
    SAMPLE_DISHES
        .iter()
        .map(|(name, category, country, ingredients)| Dish {
            id: ObjectId::new(),
            name: name.to_string(),
            category: Some(category.to_string()),
            country: Some(country.to_string()),
            price: 0.0,
            ingredients: ingredients
                .iter()
                .map(|(name, amount, unit)| Ingredient {
                    id: ObjectId::new(),
                    name: name.to_string(),
                    amount: *amount,
                    unit: unit.to_string(),
                })
                .collect(),
        })
        .collect()
}

/// Inserts the sample dishes when the collection is empty. Returns how many
/// dishes were written.
#[instrument(skip(repo))]
pub async fn seed_dishes(repo: &dyn DishRepository) -> RepositoryResult<usize> {
    if repo.count().await? > 0 {
        info!("Database already seeded");
        return Ok(0);
    }

    let dishes = sample_dishes();
    let total = dishes.len();
    for dish in dishes {
        repo.insert(dish).await?;
    }
    info!("Database seeded with {} sample dishes", total);
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_dishes_are_complete() {
        let dishes = sample_dishes();
        assert_eq!(dishes.len(), 5);
        for dish in &dishes {
            assert_eq!(dish.ingredients.len(), 6);
            assert!(dish.category.is_some());
            assert!(dish.country.is_some());
        }
        assert_eq!(dishes[0].name, "Spaghetti Carbonara");
        assert_eq!(dishes[0].ingredients[0].amount, 200.0);
    }

    #[test]
    fn test_sample_ingredient_ids_are_unique() {
        let dishes = sample_dishes();
        let ids: std::collections::HashSet<_> =
            dishes.iter().flat_map(|d| d.ingredients.iter().map(|i| i.id)).collect();
        assert_eq!(ids.len(), 30);
    }
}
