//! Collection repository and service traits.

use async_trait::async_trait;

use super::collections_model::{Collection, CollectionUpdate, NewCollection};
use crate::errors::Result;

/// Contract for the collaborator that stores collections.
#[async_trait]
pub trait CollectionRepositoryTrait: Send + Sync {
    async fn list(&self) -> Result<Vec<Collection>>;

    async fn get_by_id(&self, collection_id: &str) -> Result<Collection>;

    async fn create(&self, new_collection: NewCollection) -> Result<Collection>;

    async fn update(&self, update: CollectionUpdate) -> Result<Collection>;

    /// Deletes a collection and its tasks. Returns the number of deleted
    /// collections.
    async fn delete(&self, collection_id: &str) -> Result<usize>;
}

/// Collection operations with business validation.
#[async_trait]
pub trait CollectionServiceTrait: Send + Sync {
    async fn list_collections(&self) -> Result<Vec<Collection>>;

    async fn get_collection(&self, collection_id: &str) -> Result<Collection>;

    async fn create_collection(&self, new_collection: NewCollection) -> Result<Collection>;

    async fn update_collection(&self, update: CollectionUpdate) -> Result<Collection>;

    async fn delete_collection(&self, collection_id: &str) -> Result<()>;
}
