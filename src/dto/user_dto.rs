use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::model::user::User;

/// Body of both account creation and login. Missing fields deserialize to
/// empty strings so the handler can answer "All fields are required".
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CredentialsRequest {
    #[serde(default)]
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

impl CredentialsRequest {
    pub fn is_complete(&self) -> bool {
        !self.email.trim().is_empty() && !self.password.is_empty()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id.map(|id| id.to_hex()).unwrap_or_default(),
            email: user.email,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthToken {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserCreatedResponse {
    pub message: String,
    pub user: UserResponse,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub user: UserResponse,
    pub token: AuthToken,
}
