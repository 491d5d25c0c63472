pub mod dish_service;
pub mod user_service;
