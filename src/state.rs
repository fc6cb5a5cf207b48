use crate::db::DbPool;

/// Shared handler state; cheap to clone, the pool is reference-counted.
#[derive(Clone)]
pub struct AppState {
    pub db_pool: DbPool,
    pub raw_queries: bool,
}
