//! Items Domain
//!
//! CRUD over item records plus a batch processor that marks every stored
//! item as processed using a bounded pool of Tokio tasks.
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐     ┌─────────────┐
//! │   Service   │────►│  Processor  │  ← concurrent batch update
//! └──────┬──────┘     └──────┬──────┘
//!        │                   │
//! ┌──────▼───────────────────▼──────┐
//! │           Repository            │  ← trait + Postgres / in-memory
//! └─────────────────────────────────┘
//! ```
//!
//! ```rust,no_run
//! use domain_items::{InMemoryItemRepository, ItemService, handlers};
//!
//! let service = ItemService::new(InMemoryItemRepository::new());
//! let router = handlers::router(service);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod processor;
pub mod repository;
pub mod service;

pub use error::{ItemError, ItemResult};
pub use models::{CreateItem, DEFAULT_STATUS, Item, PROCESSED_STATUS, UpdateItem};
pub use postgres::PgItemRepository;
pub use processor::{ItemProcessor, ProcessorConfig};
pub use repository::{InMemoryItemRepository, ItemRepository};
pub use service::ItemService;
