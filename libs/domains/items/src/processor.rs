//! Concurrent batch update of every stored item.

use core_config::{ConfigError, FromEnv, env_parse_optional, env_parse_or};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::{error, info, instrument, warn};

use crate::error::{ItemError, ItemResult};
use crate::models::Item;
use crate::repository::ItemRepository;

/// Worker pool settings for [`ItemProcessor`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessorConfig {
    /// Upper bound on items updated at the same time within one batch
    pub workers: usize,
    /// Deadline for a single item once it holds a worker slot
    pub task_timeout: Option<Duration>,
}

impl ProcessorConfig {
    pub const DEFAULT_WORKERS: usize = 10;

    pub fn new(workers: usize) -> Self {
        Self {
            workers,
            task_timeout: None,
        }
    }

    pub fn with_task_timeout(mut self, timeout: Duration) -> Self {
        self.task_timeout = Some(timeout);
        self
    }
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WORKERS)
    }
}

/// Environment variables:
/// - `ITEMS_PROCESSOR_WORKERS` (default: 10, at least 1)
/// - `ITEMS_PROCESSOR_TASK_TIMEOUT_SECS` (optional, unset disables the timeout)
impl FromEnv for ProcessorConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let workers = env_parse_or("ITEMS_PROCESSOR_WORKERS", Self::DEFAULT_WORKERS)?;
        if workers == 0 {
            return Err(ConfigError::ParseError {
                key: "ITEMS_PROCESSOR_WORKERS".to_string(),
                details: "must be at least 1".to_string(),
            });
        }

        let task_timeout =
            env_parse_optional::<u64>("ITEMS_PROCESSOR_TASK_TIMEOUT_SECS")?.map(Duration::from_secs);

        Ok(Self {
            workers,
            task_timeout,
        })
    }
}

/// Marks every stored item as processed using a bounded set of Tokio tasks.
///
/// One task is spawned per id and waits for a permit from the processor's
/// semaphore before it touches the store. The semaphore is created once and
/// shared by every clone, so concurrent batches draw from the same
/// `workers`-sized pool. The batch is all-or-nothing from the caller's point of
/// view: every task runs to completion, then either the full list of updated
/// items (in id enumeration order) or the error of the first failing id is
/// returned. Items updated before a sibling failed stay updated.
pub struct ItemProcessor<R: ItemRepository> {
    repository: Arc<R>,
    config: ProcessorConfig,
    permits: Arc<Semaphore>,
}

impl<R: ItemRepository> Clone for ItemProcessor<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            config: self.config.clone(),
            permits: Arc::clone(&self.permits),
        }
    }
}

impl<R: ItemRepository + 'static> ItemProcessor<R> {
    pub fn new(repository: Arc<R>, config: ProcessorConfig) -> Self {
        let permits = Arc::new(Semaphore::new(config.workers.max(1)));
        Self {
            repository,
            config,
            permits,
        }
    }

    /// Process every item currently in the store.
    #[instrument(skip(self), fields(workers = self.config.workers))]
    pub async fn process_all(&self) -> ItemResult<Vec<Item>> {
        let ids = self.repository.list_ids().await?;
        if ids.is_empty() {
            info!("No items to process");
            return Ok(Vec::new());
        }

        info!(count = ids.len(), "Processing items");

        let handles: Vec<(i64, JoinHandle<ItemResult<Item>>)> = ids
            .into_iter()
            .map(|id| (id, self.spawn_unit(id, Arc::clone(&self.permits))))
            .collect();

        let mut items = Vec::with_capacity(handles.len());
        let mut first_error = None;

        for (id, handle) in handles {
            let outcome = match handle.await {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!(item_id = id, error = %e, "Processing task did not complete");
                    Err(ItemError::Internal(format!(
                        "task for item {} failed: {}",
                        id, e
                    )))
                }
            };

            match outcome {
                Ok(item) => items.push(item),
                Err(e) => {
                    warn!(item_id = id, error = %e, "Failed to process item");
                    first_error.get_or_insert(e);
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => {
                info!(count = items.len(), "Processed items");
                Ok(items)
            }
        }
    }

    /// Mark a single item as processed.
    pub async fn process_one(&self, id: i64) -> ItemResult<Item> {
        mark_processed(self.repository.as_ref(), id).await
    }

    fn spawn_unit(&self, id: i64, permits: Arc<Semaphore>) -> JoinHandle<ItemResult<Item>> {
        let repository = Arc::clone(&self.repository);
        let task_timeout = self.config.task_timeout;

        tokio::spawn(async move {
            let _permit = permits
                .acquire_owned()
                .await
                .map_err(|e| ItemError::Internal(e.to_string()))?;

            let unit = mark_processed(repository.as_ref(), id);
            match task_timeout {
                Some(limit) => tokio::time::timeout(limit, unit)
                    .await
                    .map_err(|_| ItemError::Timeout(id))?,
                None => unit.await,
            }
        })
    }
}

async fn mark_processed<R: ItemRepository + ?Sized>(repository: &R, id: i64) -> ItemResult<Item> {
    let mut item = repository
        .get_by_id(id)
        .await?
        .ok_or(ItemError::NotFound(id))?;

    item.mark_processed();
    repository.save(item).await
}
