use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use futures::stream::StreamExt;
use mongodb::{options::FindOptions, Collection, Database};
use tracing::{error, info};

use crate::model::dish::Dish;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};

#[async_trait]
pub trait DishRepository: Send + Sync {
    async fn insert(&self, dish: Dish) -> RepositoryResult<Dish>;
    async fn find_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<Dish>>;
    async fn list(&self, offset: u64, count: u64) -> RepositoryResult<Vec<Dish>>;
    async fn count(&self) -> RepositoryResult<u64>;
    /// Case-insensitive substring match on the dish name.
    async fn search_by_name(&self, term: &str) -> RepositoryResult<Vec<Dish>>;
    /// Replaces the whole stored document. `NotFound` if the id is unknown.
    async fn replace(&self, dish: Dish) -> RepositoryResult<Dish>;
    /// Deletes the dish together with its embedded ingredients.
    async fn delete(&self, id: &ObjectId) -> RepositoryResult<Option<Dish>>;
}

pub struct MongoDishRepository {
    collection: Collection<Dish>,
}

impl MongoDishRepository {
    pub fn new(db: &Database, collection_name: &str) -> Self {
        MongoDishRepository {
            collection: db.collection::<Dish>(collection_name),
        }
    }

    async fn collect(&self, mut cursor: mongodb::Cursor<Dish>) -> RepositoryResult<Vec<Dish>> {
        let mut dishes = Vec::new();
        while let Some(dish) = cursor.next().await {
            match dish {
                Ok(d) => dishes.push(d),
                Err(e) => {
                    error!("Failed to deserialize dish: {}", e);
                    return Err(RepositoryError::serialization(format!("Failed to deserialize dish: {}", e)));
                }
            }
        }
        Ok(dishes)
    }
}

#[async_trait]
impl DishRepository for MongoDishRepository {
    #[tracing::instrument(skip(self, dish), fields(id = %dish.id, name = %dish.name))]
    async fn insert(&self, dish: Dish) -> RepositoryResult<Dish> {
        info!("Inserting dish");
        match self.collection.insert_one(&dish, None).await {
            Ok(_) => {
                info!("Dish inserted successfully");
                Ok(dish)
            }
            Err(e) => {
                error!("Failed to insert dish: {}", e);
                Err(RepositoryError::from(e))
            }
        }
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn find_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<Dish>> {
        let filter = doc! { "_id": id };
        self.collection.find_one(filter, None).await.map_err(|e| {
            error!("Failed to fetch dish by ID: {}", e);
            RepositoryError::database(format!("Failed to fetch dish by ID: {}", e))
        })
    }

    #[tracing::instrument(skip(self))]
    async fn list(&self, offset: u64, count: u64) -> RepositoryResult<Vec<Dish>> {
        info!("Listing dishes with offset: {}, count: {}", offset, count);
        let options = FindOptions::builder()
            .sort(doc! { "_id": 1 })
            .skip(offset)
            .limit(count as i64)
            .build();
        let cursor = self.collection.find(None, options).await.map_err(|e| {
            error!("Failed to list dishes: {}", e);
            RepositoryError::database(format!("Failed to list dishes: {}", e))
        })?;
        let dishes = self.collect(cursor).await?;
        info!("Fetched {} dishes", dishes.len());
        Ok(dishes)
    }

    #[tracing::instrument(skip(self))]
    async fn count(&self) -> RepositoryResult<u64> {
        self.collection.count_documents(None, None).await.map_err(|e| {
            error!("Failed to count dishes: {}", e);
            RepositoryError::database(format!("Failed to count dishes: {}", e))
        })
    }

    #[tracing::instrument(skip(self))]
    async fn search_by_name(&self, term: &str) -> RepositoryResult<Vec<Dish>> {
        let filter = doc! {
            "name": { "$regex": regex::escape(term), "$options": "i" }
        };
        let options = FindOptions::builder().sort(doc! { "_id": 1 }).build();
        let cursor = self.collection.find(filter, options).await.map_err(|e| {
            error!("Failed to search dishes: {}", e);
            RepositoryError::database(format!("Failed to search dishes: {}", e))
        })?;
        let dishes = self.collect(cursor).await?;
        info!("Search matched {} dishes", dishes.len());
        Ok(dishes)
    }

    #[tracing::instrument(skip(self, dish), fields(id = %dish.id))]
    async fn replace(&self, dish: Dish) -> RepositoryResult<Dish> {
        let filter = doc! { "_id": dish.id };
        match self.collection.replace_one(filter, &dish, None).await {
            Ok(result) if result.matched_count > 0 => {
                info!("Dish replaced successfully");
                Ok(dish)
            }
            Ok(_) => Err(RepositoryError::not_found(format!("No dish found to update for ID: {}", dish.id))),
            Err(e) => {
                error!("Failed to replace dish: {}", e);
                Err(RepositoryError::from(e))
            }
        }
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: &ObjectId) -> RepositoryResult<Option<Dish>> {
        let filter = doc! { "_id": id };
        let deleted = self.collection.find_one_and_delete(filter, None).await.map_err(|e| {
            error!("Failed to delete dish: {}", e);
            RepositoryError::database(format!("Failed to delete dish: {}", e))
        })?;
        if deleted.is_some() {
            info!("Dish deleted successfully");
        }
        Ok(deleted)
    }
}
