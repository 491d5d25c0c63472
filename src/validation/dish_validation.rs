//! Shape and type checks for untyped dish and ingredient payloads.
//!
//! Request bodies reach the service as `serde_json::Value` so that type
//! mistakes ("category": 3) and the single-field PATCH rule can be reported
//! with readable messages. Each `parse_*` function walks the payload once,
//! collecting every problem it finds, and only yields a typed input when the
//! list is empty.
//!
//! The `validator` derive used for user payloads runs on structs that serde
//! has already built, so a wrong JSON type fails deserialization on the first
//! bad field and nothing else gets checked. Walking the `Value` by hand keeps
//! one message per field across the whole body.

use serde_json::{Map, Value};

use crate::dto::dish_dto::{DishInput, DishPatch, IngredientInput, IngredientPatch};

pub const SINGLE_FIELD_MESSAGE: &str = "Only one field can be updated at a time";

const DISH_FIELDS: [&str; 5] = ["name", "category", "country", "price", "ingredients"];
const INGREDIENT_FIELDS: [&str; 3] = ["name", "amount", "unit"];

/// Returns every problem with a dish payload. Empty means valid.
pub fn validate_dish(payload: &Value) -> Vec<String> {
    parse_dish(payload).err().unwrap_or_default()
}

/// Returns every problem with an ingredient payload. Empty means valid.
pub fn validate_ingredient(payload: &Value) -> Vec<String> {
    parse_ingredient(payload).err().unwrap_or_default()
}

pub fn parse_dish(payload: &Value) -> Result<DishInput, Vec<String>> {
    let obj = payload
        .as_object()
        .ok_or_else(|| vec!["Dish must be an object".to_string()])?;

    let mut errors = Vec::new();

    let name = dish_name(obj.get("name"), &mut errors);
    let category = optional_string(obj.get("category"), "Dish category must be a string", &mut errors);
    let country = optional_string(obj.get("country"), "Dish country must be a string", &mut errors);
    let price = match obj.get("price") {
        None | Some(Value::Null) => Some(0.0),
        Some(value) => parse_price(value, &mut errors),
    };
    let ingredients = match obj.get("ingredients") {
        None | Some(Value::Null) => Some(Vec::new()),
        Some(value) => ingredient_list(value, &mut errors),
    };

    match (name, category, country, price, ingredients) {
        (Some(name), Some(category), Some(country), Some(price), Some(ingredients)) if errors.is_empty() => {
            Ok(DishInput {
                name,
                category,
                country,
                price,
                ingredients,
            })
        }
        _ => Err(errors),
    }
}

/// Validates a dish PATCH body, which must carry exactly one known field.
pub fn parse_dish_patch(payload: &Value) -> Result<DishPatch, Vec<String>> {
    let (key, value) = single_field(payload, "Dish")?;

    let mut errors = Vec::new();
    let patch = match key.as_str() {
        "name" => dish_name(Some(value), &mut errors).map(DishPatch::Name),
        "category" => optional_string(Some(value), "Dish category must be a string", &mut errors)
            .map(DishPatch::Category),
        "country" => optional_string(Some(value), "Dish country must be a string", &mut errors)
            .map(DishPatch::Country),
        "price" => parse_price(value, &mut errors).map(DishPatch::Price),
        "ingredients" => ingredient_list(value, &mut errors).map(DishPatch::Ingredients),
        other => {
            errors.push(format!(
                "Unknown dish field '{}', expected one of: {}",
                other,
                DISH_FIELDS.join(", ")
            ));
            None
        }
    };

    match patch {
        Some(patch) if errors.is_empty() => Ok(patch),
        _ => Err(errors),
    }
}

pub fn parse_ingredient(payload: &Value) -> Result<IngredientInput, Vec<String>> {
    let obj = payload
        .as_object()
        .ok_or_else(|| vec!["Ingredient must be an object".to_string()])?;

    let mut errors = Vec::new();
    let name = required_string(obj.get("name"), "Ingredient name must be a non-empty string", &mut errors);
    let amount = parse_amount(obj.get("amount"), &mut errors);
    let unit = required_string(obj.get("unit"), "Ingredient unit must be a non-empty string", &mut errors);

    match (name, amount, unit) {
        (Some(name), Some(amount), Some(unit)) if errors.is_empty() => Ok(IngredientInput { name, amount, unit }),
        _ => Err(errors),
    }
}

/// Validates an ingredient PATCH body, which must carry exactly one known field.
pub fn parse_ingredient_patch(payload: &Value) -> Result<IngredientPatch, Vec<String>> {
    let (key, value) = single_field(payload, "Ingredient")?;

    let mut errors = Vec::new();
    let patch = match key.as_str() {
        "name" => required_string(Some(value), "Ingredient name must be a non-empty string", &mut errors)
            .map(IngredientPatch::Name),
        "amount" => parse_amount(Some(value), &mut errors).map(IngredientPatch::Amount),
        "unit" => required_string(Some(value), "Ingredient unit must be a non-empty string", &mut errors)
            .map(IngredientPatch::Unit),
        other => {
            errors.push(format!(
                "Unknown ingredient field '{}', expected one of: {}",
                other,
                INGREDIENT_FIELDS.join(", ")
            ));
            None
        }
    };

    match patch {
        Some(patch) if errors.is_empty() => Ok(patch),
        _ => Err(errors),
    }
}

fn single_field<'a>(payload: &'a Value, what: &str) -> Result<(&'a String, &'a Value), Vec<String>> {
    let obj: &Map<String, Value> = payload
        .as_object()
        .ok_or_else(|| vec![format!("{} must be an object", what)])?;
    if obj.len() != 1 {
        return Err(vec![SINGLE_FIELD_MESSAGE.to_string()]);
    }
    obj.iter().next().ok_or_else(|| vec![SINGLE_FIELD_MESSAGE.to_string()])
}

fn dish_name(value: Option<&Value>, errors: &mut Vec<String>) -> Option<String> {
    required_string(value, "Dish name must be a non-empty string", errors)
}

fn required_string(value: Option<&Value>, message: &str, errors: &mut Vec<String>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
        _ => {
            errors.push(message.to_string());
            None
        }
    }
}

/// `None` on error, `Some(None)` when absent or null.
fn optional_string(value: Option<&Value>, message: &str, errors: &mut Vec<String>) -> Option<Option<String>> {
    match value {
        None | Some(Value::Null) => Some(None),
        Some(Value::String(s)) => Some(Some(s.clone())),
        Some(_) => {
            errors.push(message.to_string());
            None
        }
    }
}

fn parse_price(value: &Value, errors: &mut Vec<String>) -> Option<f64> {
    match coerce_number(value) {
        Some(price) => Some(price),
        None => {
            errors.push("Dish price must be a number".to_string());
            None
        }
    }
}

fn parse_amount(value: Option<&Value>, errors: &mut Vec<String>) -> Option<f64> {
    match value.and_then(coerce_number) {
        Some(amount) if amount < 0.0 => {
            errors.push("Ingredient amount must not be negative".to_string());
            None
        }
        Some(amount) => Some(amount),
        None => {
            errors.push("Ingredient amount must be a number".to_string());
            None
        }
    }
}

fn ingredient_list(value: &Value, errors: &mut Vec<String>) -> Option<Vec<IngredientInput>> {
    let items = match value.as_array() {
        Some(items) => items,
        None => {
            errors.push("Dish ingredients must be an array".to_string());
            return None;
        }
    };

    let mut parsed = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match parse_ingredient(item) {
            Ok(ingredient) => parsed.push(ingredient),
            Err(item_errors) => {
                errors.extend(item_errors.into_iter().map(|e| format!("ingredients[{}]: {}", index, e)));
            }
        }
    }

    if parsed.len() == items.len() {
        Some(parsed)
    } else {
        None
    }
}

/// Accepts JSON numbers and numeric strings ("2.5"). NaN and infinities are rejected.
fn coerce_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}
