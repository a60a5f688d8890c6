use crate::DbPool;

/// Repository implementation backed by a PostgreSQL pool.
///
/// Implements every trait in [`crate::repositories`]; clone it freely, the
/// pool is reference-counted.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}
