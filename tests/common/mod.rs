#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use bson::oid::ObjectId;
use chrono::Local;
use serde_json::Value;
use tower::ServiceExt;

use dishes_backend::app::app::build_router;
use dishes_backend::config::JwtConfig;
use dishes_backend::middlewares::auth_middleware::AuthState;
use dishes_backend::model::dish::Dish;
use dishes_backend::model::user::User;
use dishes_backend::repository::dish_repo::DishRepository;
use dishes_backend::repository::repository_error::{RepositoryError, RepositoryResult};
use dishes_backend::repository::user_repo::UserRepository;
use dishes_backend::service::dish_service::DishServiceImpl;
use dishes_backend::service::user_service::UserServiceImpl;
use dishes_backend::util::jwt::{JwtTokenUtils, JwtTokenUtilsImpl};

/// Dish store kept in insertion order.
#[derive(Default)]
pub struct InMemoryDishRepository {
    dishes: Mutex<Vec<Dish>>,
}

#[async_trait]
impl DishRepository for InMemoryDishRepository {
    async fn insert(&self, dish: Dish) -> RepositoryResult<Dish> {
        let mut dishes = self.dishes.lock().unwrap();
        if dishes.iter().any(|d| d.id == dish.id) {
            return Err(RepositoryError::already_exists("duplicate dish id"));
        }
        dishes.push(dish.clone());
        Ok(dish)
    }

    async fn find_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<Dish>> {
        Ok(self.dishes.lock().unwrap().iter().find(|d| &d.id == id).cloned())
    }

    async fn list(&self, offset: u64, count: u64) -> RepositoryResult<Vec<Dish>> {
        let dishes = self.dishes.lock().unwrap();
        Ok(dishes.iter().skip(offset as usize).take(count as usize).cloned().collect())
    }

    async fn count(&self) -> RepositoryResult<u64> {
        Ok(self.dishes.lock().unwrap().len() as u64)
    }

    async fn search_by_name(&self, term: &str) -> RepositoryResult<Vec<Dish>> {
        let term = term.to_lowercase();
        let dishes = self.dishes.lock().unwrap();
        Ok(dishes
            .iter()
            .filter(|d| d.name.to_lowercase().contains(&term))
            .cloned()
            .collect())
    }

    async fn replace(&self, dish: Dish) -> RepositoryResult<Dish> {
        let mut dishes = self.dishes.lock().unwrap();
        match dishes.iter_mut().find(|d| d.id == dish.id) {
            Some(slot) => {
                *slot = dish.clone();
                Ok(dish)
            }
            None => Err(RepositoryError::not_found("Dish not found")),
        }
    }

    async fn delete(&self, id: &ObjectId) -> RepositoryResult<Option<Dish>> {
        let mut dishes = self.dishes.lock().unwrap();
        let pos = dishes.iter().position(|d| &d.id == id);
        Ok(pos.map(|i| dishes.remove(i)))
    }
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, mut user: User) -> RepositoryResult<User> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(RepositoryError::already_exists(format!(
                "A user with email {} already exists",
                user.email
            )));
        }
        user.id = Some(ObjectId::new());
        let now = Local::now().to_rfc3339();
        user.created_at = Some(now.clone());
        user.updated_at = Some(now);
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.email == email).cloned())
    }
}

pub struct TestApp {
    pub router: Router,
    pub dish_repo: Arc<InMemoryDishRepository>,
    pub jwt_utils: Arc<JwtTokenUtilsImpl>,
}

impl TestApp {
    pub fn new(auth_required: bool) -> Self {
        let dish_repo = Arc::new(InMemoryDishRepository::default());
        let user_repo = Arc::new(InMemoryUserRepository::default());
        let jwt_utils = Arc::new(JwtTokenUtilsImpl::new(JwtConfig::default()));

        let dish_service = Arc::new(DishServiceImpl::new(dish_repo.clone()));
        let user_service = Arc::new(UserServiceImpl::new(user_repo, jwt_utils.clone()));
        let auth_state = Arc::new(AuthState {
            jwt_utils: jwt_utils.clone(),
            auth_required,
        });

        TestApp {
            router: build_router(dish_service, user_service, auth_state),
            dish_repo,
            jwt_utils,
        }
    }

    /// App with auth enforced and a valid token at hand.
    pub fn with_auth() -> (Self, String) {
        let app = Self::new(true);
        let token = app
            .jwt_utils
            .generate_access_token(&ObjectId::new().to_hex(), "cook@example.com")
            .unwrap();
        (app, token)
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>, token: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let req = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None, None).await
    }

    /// Creates a dish through the API and returns the stored body.
    pub async fn create_dish(&self, body: Value, token: Option<&str>) -> Value {
        let (status, json) = self.request(Method::POST, "/api/dishes", Some(body), token).await;
        assert_eq!(status, StatusCode::CREATED, "unexpected body: {json}");
        json["dish"].clone()
    }
}
