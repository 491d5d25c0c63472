pub mod dish_validation;
