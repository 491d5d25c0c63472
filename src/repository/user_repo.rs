use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use chrono::Local;
use mongodb::{options::IndexOptions, Collection, Database, IndexModel};
use tracing::{error, info};

use crate::model::user::User;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Stores a new user. `AlreadyExists` when the email is taken.
    async fn insert(&self, user: User) -> RepositoryResult<User>;
    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>>;
}

pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    pub fn new(db: &Database, collection_name: &str) -> Self {
        MongoUserRepository {
            collection: db.collection::<User>(collection_name),
        }
    }

    /// Creates the unique index on `email` if it does not exist yet.
    pub async fn ensure_indexes(&self) -> RepositoryResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.collection.create_index(index, None).await?;
        info!("Unique email index ensured on users collection");
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    #[tracing::instrument(skip(self, user), fields(email = %user.email))]
    async fn insert(&self, mut user: User) -> RepositoryResult<User> {
        user.id = Some(ObjectId::new());
        let now = Local::now().to_rfc3339();
        user.created_at = Some(now.clone());
        user.updated_at = Some(now);

        match self.collection.insert_one(&user, None).await {
            Ok(_) => Ok(user),
            Err(e) => {
                error!("Failed to insert user: {}", e);
                match RepositoryError::from(e) {
                    RepositoryError::AlreadyExists(_) => Err(RepositoryError::already_exists(format!(
                        "A user with email {} already exists",
                        user.email
                    ))),
                    other => Err(other),
                }
            }
        }
    }

    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        let filter = doc! { "email": email };
        let user = self
            .collection
            .find_one(filter, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to find user by email: {}", e)))?;
        Ok(user)
    }
}
