pub mod dish;
pub mod user;
