use axum::Router;
use domain_items::{ItemService, PgItemRepository, handlers};

pub fn router(state: &crate::state::AppState) -> Router {
    let repository = PgItemRepository::new(state.db.clone());
    let service = ItemService::with_processor_config(repository, state.config.processor.clone());
    handlers::router(service)
}
