pub mod dish_handler;
pub mod ingredient_handler;
pub mod user_handler;

use bson::oid::ObjectId;

use crate::util::error::HandlerError;

pub(crate) fn parse_dish_id(raw: &str) -> Result<ObjectId, HandlerError> {
    ObjectId::parse_str(raw).map_err(|_| HandlerError::bad_request("Invalid dish id"))
}

pub(crate) fn parse_ingredient_id(raw: &str) -> Result<ObjectId, HandlerError> {
    ObjectId::parse_str(raw).map_err(|_| HandlerError::bad_request("Invalid ingredient id"))
}
