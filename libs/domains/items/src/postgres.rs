use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder, QuerySelect,
};

use crate::{
    entity,
    error::{ItemError, ItemResult},
    models::{CreateItem, Item},
    repository::ItemRepository,
};

/// SeaORM-backed repository over the `items` table
#[derive(Clone)]
pub struct PgItemRepository {
    db: DatabaseConnection,
}

impl PgItemRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ItemRepository for PgItemRepository {
    async fn list_all(&self) -> ItemResult<Vec<Item>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Item::from).collect())
    }

    async fn list_ids(&self) -> ItemResult<Vec<i64>> {
        let ids = entity::Entity::find()
            .select_only()
            .column(entity::Column::Id)
            .order_by_asc(entity::Column::Id)
            .into_tuple::<i64>()
            .all(&self.db)
            .await?;

        Ok(ids)
    }

    async fn get_by_id(&self, id: i64) -> ItemResult<Option<Item>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Item::from))
    }

    async fn create(&self, input: CreateItem) -> ItemResult<Item> {
        let active_model: entity::ActiveModel = input.into();
        let model = active_model.insert(&self.db).await?;

        tracing::info!(item_id = model.id, "Created item");
        Ok(model.into())
    }

    async fn save(&self, item: Item) -> ItemResult<Item> {
        let id = item.id;
        let active_model: entity::ActiveModel = item.into();

        match active_model.update(&self.db).await {
            Ok(model) => Ok(model.into()),
            Err(DbErr::RecordNotUpdated) => Err(ItemError::NotFound(id)),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, id: i64) -> ItemResult<bool> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected > 0 {
            tracing::info!(item_id = id, "Deleted item");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn model(id: i64, status: &str) -> entity::Model {
        entity::Model {
            id,
            name: format!("item-{id}"),
            description: "mocked".to_string(),
            status: status.to_string(),
            email: "owner@example.com".to_string(),
        }
    }

    #[tokio::test]
    async fn test_list_all_maps_models() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(1, "NEW"), model(2, "PROCESSED")]])
            .into_connection();
        let repo = PgItemRepository::new(db);

        let items = repo.list_all().await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, 1);
        assert!(items[1].is_processed());
    }

    #[tokio::test]
    async fn test_get_by_id_missing_is_none() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<entity::Model>::new()])
            .into_connection();
        let repo = PgItemRepository::new(db);

        assert_eq!(repo.get_by_id(5).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_create_returns_stored_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(11, "NEW")]])
            .into_connection();
        let repo = PgItemRepository::new(db);

        let item = repo
            .create(CreateItem::new("item-11", "mocked", "owner@example.com"))
            .await
            .unwrap();
        assert_eq!(item.id, 11);
        assert_eq!(item.status, "NEW");
    }

    #[tokio::test]
    async fn test_save_missing_row_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<entity::Model>::new()])
            .into_connection();
        let repo = PgItemRepository::new(db);

        let result = repo.save(model(99, "PROCESSED").into()).await;
        assert_eq!(result, Err(ItemError::NotFound(99)));
    }

    #[tokio::test]
    async fn test_delete_reports_rows_affected() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                },
            ])
            .into_connection();
        let repo = PgItemRepository::new(db);

        assert!(repo.delete(1).await.unwrap());
        assert!(!repo.delete(1).await.unwrap());
    }

    #[tokio::test]
    async fn test_query_error_maps_to_store() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection reset".to_string())])
            .into_connection();
        let repo = PgItemRepository::new(db);

        assert!(matches!(repo.list_all().await, Err(ItemError::Store(_))));
    }
}
