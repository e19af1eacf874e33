//! Shared state handed to route builders and the readiness handler.

/// Cloned per handler; the connection pool is reference counted.
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    /// PostgreSQL connection pool
    pub db: database::postgres::DatabaseConnection,
}
