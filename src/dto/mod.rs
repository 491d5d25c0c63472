pub mod dish_dto;
pub mod user_dto;
