use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A dish document. Ingredients live inside the dish document, so removing
/// the dish removes them too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dish {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub amount: f64,
    pub unit: String,
}

impl Dish {
    pub fn ingredient(&self, id: &ObjectId) -> Option<&Ingredient> {
        self.ingredients.iter().find(|i| &i.id == id)
    }

    pub fn ingredient_mut(&mut self, id: &ObjectId) -> Option<&mut Ingredient> {
        self.ingredients.iter_mut().find(|i| &i.id == id)
    }

    /// Removes the ingredient with `id`, returning it if it was present.
    pub fn remove_ingredient(&mut self, id: &ObjectId) -> Option<Ingredient> {
        let pos = self.ingredients.iter().position(|i| &i.id == id)?;
        Some(self.ingredients.remove(pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ingredient(name: &str) -> Ingredient {
        Ingredient {
            id: ObjectId::new(),
            name: name.to_string(),
            amount: 1.0,
            unit: "unit".to_string(),
        }
    }

    #[test]
    fn test_remove_ingredient_keeps_order() {
        let (a, b, c) = (ingredient("a"), ingredient("b"), ingredient("c"));
        let mut dish = Dish {
            id: ObjectId::new(),
            name: "Soup".to_string(),
            category: None,
            country: None,
            price: 0.0,
            ingredients: vec![a.clone(), b.clone(), c.clone()],
        };
        assert_eq!(dish.remove_ingredient(&b.id), Some(b.clone()));
        assert_eq!(dish.ingredients, vec![a, c]);
        assert!(dish.remove_ingredient(&b.id).is_none());
    }

    #[test]
    fn test_missing_optional_fields_deserialize_to_defaults() {
        let id = ObjectId::new();
        let doc = bson::doc! { "_id": id, "name": "Bread" };
        let dish: Dish = bson::from_document(doc).unwrap();
        assert_eq!(dish.id, id);
        assert_eq!(dish.price, 0.0);
        assert!(dish.category.is_none());
        assert!(dish.ingredients.is_empty());
    }
}
