use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, instrument};

use crate::dto::user_dto::{AuthToken, LoginResponse, UserResponse};
use crate::model::user::User;
use crate::repository::user_repo::UserRepository;
use crate::util::error::ServiceError;
use crate::util::jwt::{JwtTokenUtils, JwtTokenUtilsImpl, BEARER};
use crate::util::password::{PasswordUtils, PasswordUtilsImpl};

#[async_trait]
pub trait UserService: Send + Sync {
    async fn register(&self, email: String, password: String) -> Result<UserResponse, ServiceError>;
    async fn login(&self, email: String, password: String) -> Result<LoginResponse, ServiceError>;
}

pub struct UserServiceImpl {
    pub user_repo: Arc<dyn UserRepository>,
    pub jwt_utils: Arc<JwtTokenUtilsImpl>,
}

impl UserServiceImpl {
    pub fn new(user_repo: Arc<dyn UserRepository>, jwt_utils: Arc<JwtTokenUtilsImpl>) -> Self {
        Self { user_repo, jwt_utils }
    }
}

#[async_trait]
impl UserService for UserServiceImpl {
    #[instrument(skip(self, password), fields(email = %email))]
    async fn register(&self, email: String, password: String) -> Result<UserResponse, ServiceError> {
        info!("Registering new user");
        let password_hash = tokio::task::spawn_blocking(move || PasswordUtilsImpl::hash_password(&password))
            .await
            .map_err(|e| ServiceError::InternalError(format!("Password hash task failed: {}", e)))?
            .map_err(|e| ServiceError::InternalError(format!("Password hash error: {}", e)))?;

        let user = User {
            id: None,
            email,
            password_hash,
            created_at: None,
            updated_at: None,
        };
        let inserted = self.user_repo.insert(user).await;
        match &inserted {
            Ok(_) => info!("User inserted successfully"),
            Err(e) => error!("Failed to insert user: {e}"),
        }
        Ok(UserResponse::from(inserted?))
    }

    #[instrument(skip(self, password), fields(email = %email))]
    async fn login(&self, email: String, password: String) -> Result<LoginResponse, ServiceError> {
        info!("User login attempt");
        let user_opt = self.user_repo.find_by_email(&email).await;
        match &user_opt {
            Ok(Some(_)) => info!("User found for login"),
            Ok(None) => error!("User not found for login"),
            Err(e) => error!("Failed to fetch user for login: {e}"),
        }
        let user = user_opt?.ok_or(ServiceError::NotFound("User not found".to_string()))?;

        // Argon2 is CPU bound; keep it off the async workers.
        let stored_hash = user.password_hash.clone();
        let valid = tokio::task::spawn_blocking(move || PasswordUtilsImpl::verify_password(&password, &stored_hash))
            .await
            .map_err(|e| ServiceError::InternalError(format!("Password verify task failed: {}", e)))?
            .map_err(|e| ServiceError::InternalError(format!("Password verify error: {}", e)))?;
        if !valid {
            error!("Invalid credentials for user: {}", email);
            return Err(ServiceError::Unauthorized("Invalid credentials".to_string()));
        }

        let user_id = user.id.map(|id| id.to_hex()).unwrap_or_default();
        let access_token = self
            .jwt_utils
            .generate_access_token(&user_id, &user.email)
            .map_err(|e| ServiceError::InternalError(format!("JWT error: {}", e)))?;

        info!("User logged in successfully");
        Ok(LoginResponse {
            message: "Login successful".to_string(),
            user: UserResponse::from(user),
            token: AuthToken {
                access_token,
                token_type: BEARER.to_string(),
                expires_in: self.jwt_utils.access_token_ttl_secs(),
            },
        })
    }
}
