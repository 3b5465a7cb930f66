use log::debug;
use std::sync::Arc;

use super::collections_model::{Collection, CollectionUpdate, NewCollection};
use super::collections_traits::{CollectionRepositoryTrait, CollectionServiceTrait};
use crate::errors::{Error, RepositoryError, Result};
use crate::events::{DomainEvent, DomainEventSink};

/// Service for managing collections
pub struct CollectionService {
    repository: Arc<dyn CollectionRepositoryTrait>,
    event_sink: Arc<dyn DomainEventSink>,
}

impl CollectionService {
    pub fn new(
        repository: Arc<dyn CollectionRepositoryTrait>,
        event_sink: Arc<dyn DomainEventSink>,
    ) -> Self {
        Self {
            repository,
            event_sink,
        }
    }
}

#[async_trait::async_trait]
impl CollectionServiceTrait for CollectionService {
    async fn list_collections(&self) -> Result<Vec<Collection>> {
        self.repository.list().await
    }

    /// Maps a missing record to `CollectionNotFound`
    async fn get_collection(&self, collection_id: &str) -> Result<Collection> {
        match self.repository.get_by_id(collection_id).await {
            Err(Error::Repository(RepositoryError::NotFound(_))) => {
                Err(Error::CollectionNotFound(collection_id.to_string()))
            }
            other => other,
        }
    }

    async fn create_collection(&self, new_collection: NewCollection) -> Result<Collection> {
        new_collection.validate()?;
        debug!("Creating collection '{}'", new_collection.name);

        let collection = self
            .repository
            .create(NewCollection {
                name: new_collection.name.trim().to_string(),
                ..new_collection
            })
            .await?;
        self.event_sink
            .emit(DomainEvent::collections_changed(vec![collection.id.clone()]));
        Ok(collection)
    }

    async fn update_collection(&self, update: CollectionUpdate) -> Result<Collection> {
        update.validate()?;
        debug!("Updating collection {}", update.id);

        let collection = self.repository.update(update).await?;
        self.event_sink
            .emit(DomainEvent::collections_changed(vec![collection.id.clone()]));
        Ok(collection)
    }

    async fn delete_collection(&self, collection_id: &str) -> Result<()> {
        let deleted = self.repository.delete(collection_id).await?;
        if deleted == 0 {
            return Err(Error::CollectionNotFound(collection_id.to_string()));
        }
        debug!("Deleted collection {}", collection_id);
        self.event_sink
            .emit(DomainEvent::collections_changed(vec![collection_id.to_string()]));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::MockDomainEventSink;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Clone, Default)]
    struct MockCollectionRepository {
        collections: Arc<Mutex<Vec<Collection>>>,
    }

    #[async_trait]
    impl CollectionRepositoryTrait for MockCollectionRepository {
        async fn list(&self) -> Result<Vec<Collection>> {
            Ok(self.collections.lock().unwrap().clone())
        }

        async fn get_by_id(&self, collection_id: &str) -> Result<Collection> {
            self.collections
                .lock()
                .unwrap()
                .iter()
                .find(|c| c.id == collection_id)
                .cloned()
                .ok_or_else(|| RepositoryError::NotFound(collection_id.to_string()).into())
        }

        async fn create(&self, new_collection: NewCollection) -> Result<Collection> {
            let mut collections = self.collections.lock().unwrap();
            let collection = Collection {
                id: format!("c{}", collections.len() + 1),
                name: new_collection.name,
                description: new_collection.description,
                ..Default::default()
            };
            collections.push(collection.clone());
            Ok(collection)
        }

        async fn update(&self, update: CollectionUpdate) -> Result<Collection> {
            let mut collections = self.collections.lock().unwrap();
            let collection = collections
                .iter_mut()
                .find(|c| c.id == update.id)
                .ok_or_else(|| RepositoryError::NotFound(update.id.clone()))?;
            collection.name = update.name;
            collection.description = update.description;
            Ok(collection.clone())
        }

        async fn delete(&self, collection_id: &str) -> Result<usize> {
            let mut collections = self.collections.lock().unwrap();
            let before = collections.len();
            collections.retain(|c| c.id != collection_id);
            Ok(before - collections.len())
        }
    }

    fn setup() -> (CollectionService, MockCollectionRepository, MockDomainEventSink) {
        let repo = MockCollectionRepository::default();
        let sink = MockDomainEventSink::new();
        let service = CollectionService::new(Arc::new(repo.clone()), Arc::new(sink.clone()));
        (service, repo, sink)
    }

    #[tokio::test]
    async fn test_collection_lifecycle() {
        let (service, _, sink) = setup();

        let created = service
            .create_collection(NewCollection {
                name: "  Home ".to_string(),
                description: "Chores".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(created.id, "c1");
        assert_eq!(created.name, "Home");

        let updated = service
            .update_collection(CollectionUpdate {
                id: "c1".to_string(),
                name: "House".to_string(),
                description: String::new(),
            })
            .await
            .unwrap();
        assert_eq!(updated.name, "House");
        assert_eq!(service.list_collections().await.unwrap(), vec![updated]);

        service.delete_collection("c1").await.unwrap();
        assert!(service.list_collections().await.unwrap().is_empty());

        assert_eq!(
            sink.events(),
            vec![DomainEvent::collections_changed(vec!["c1".to_string()]); 3]
        );
    }

    #[tokio::test]
    async fn test_create_collection_rejects_blank_name() {
        let (service, repo, sink) = setup();
        let err = service
            .create_collection(NewCollection {
                name: "   ".to_string(),
                description: String::new(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(repo.collections.lock().unwrap().is_empty());
        assert!(sink.is_empty());
    }

    #[tokio::test]
    async fn test_missing_collection_maps_to_not_found() {
        let (service, _, sink) = setup();

        let err = service.get_collection("nope").await.unwrap_err();
        assert!(matches!(err, Error::CollectionNotFound(_)));

        let err = service.delete_collection("nope").await.unwrap_err();
        assert!(matches!(err, Error::CollectionNotFound(_)));
        assert!(sink.is_empty());
    }
}
