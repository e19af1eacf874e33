use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{ItemError, ItemResult};
use crate::models::{CreateItem, Item, UpdateItem};
use crate::processor::{ItemProcessor, ProcessorConfig};
use crate::repository::ItemRepository;

/// Service layer for Item business logic
pub struct ItemService<R: ItemRepository> {
    repository: Arc<R>,
    processor: ItemProcessor<R>,
}

impl<R: ItemRepository> Clone for ItemService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            processor: self.processor.clone(),
        }
    }
}

impl<R: ItemRepository + 'static> ItemService<R> {
    pub fn new(repository: R) -> Self {
        Self::with_processor_config(repository, ProcessorConfig::default())
    }

    pub fn with_processor_config(repository: R, config: ProcessorConfig) -> Self {
        let repository = Arc::new(repository);
        let processor = ItemProcessor::new(Arc::clone(&repository), config);
        Self {
            repository,
            processor,
        }
    }

    #[instrument(skip(self))]
    pub async fn list_items(&self) -> ItemResult<Vec<Item>> {
        self.repository.list_all().await
    }

    #[instrument(skip(self))]
    pub async fn get_item(&self, id: i64) -> ItemResult<Item> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ItemError::NotFound(id))
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_item(&self, input: CreateItem) -> ItemResult<Item> {
        input.validate()?;
        self.repository.create(input).await
    }

    #[instrument(skip(self, input))]
    pub async fn update_item(&self, id: i64, input: UpdateItem) -> ItemResult<Item> {
        input.validate()?;

        let mut item = self.get_item(id).await?;
        item.apply_update(input);
        self.repository.save(item).await
    }

    #[instrument(skip(self))]
    pub async fn delete_item(&self, id: i64) -> ItemResult<()> {
        if !self.repository.delete(id).await? {
            return Err(ItemError::NotFound(id));
        }
        Ok(())
    }

    /// Mark every stored item as processed. See [`ItemProcessor::process_all`].
    #[instrument(skip(self))]
    pub async fn process_items(&self) -> ItemResult<Vec<Item>> {
        self.processor.process_all().await
    }
}
