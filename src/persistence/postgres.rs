//! Pooled `PostgreSQL` execution for Diesel repositories.
//!
//! Diesel connections are synchronous, so every call is offloaded to
//! [`tokio::task::spawn_blocking`]. Each call borrows one pooled connection,
//! runs inside a single transaction, and returns the connection to the pool
//! whether it commits or rolls back.

use std::time::Duration;

use diesel::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};

use super::error::{RepositoryError, RepositoryResult};

/// `PostgreSQL` connection pool type.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Builds a connection pool for the given database URL.
///
/// # Errors
///
/// Returns [`RepositoryError::Connection`] when the pool cannot be created.
pub fn build_pool(database_url: &str, max_size: u32) -> RepositoryResult<PgPool> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Pool::builder()
        .max_size(max_size)
        .build(manager)
        .map_err(|err| RepositoryError::connection(err.to_string()))
}

/// Transactional executor over a `PostgreSQL` pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
    statement_timeout: Option<Duration>,
}

impl PgStore {
    /// Creates a store without a statement timeout.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self {
            pool,
            statement_timeout: None,
        }
    }

    /// Bounds every statement run by this store.
    ///
    /// The timeout is applied with `SET LOCAL statement_timeout` so an
    /// abandoned request cannot keep a query running on the server.
    #[must_use]
    pub const fn with_statement_timeout(mut self, timeout: Duration) -> Self {
        self.statement_timeout = Some(timeout);
        self
    }

    /// Returns a reference to the connection pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs `work` inside one transaction on a pooled connection.
    ///
    /// The transaction commits when `work` returns `Ok` and rolls back on
    /// any error, so partial writes are never visible.
    ///
    /// # Errors
    ///
    /// Returns the error produced by `work`, or a connection error when no
    /// connection is available or the blocking task fails.
    pub async fn transaction<F, T>(&self, work: F) -> RepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> RepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        let timeout_ms = self.statement_timeout.map(|timeout| timeout.as_millis());

        tokio::task::spawn_blocking(move || {
            let mut pooled = pool
                .get()
                .map_err(|err| RepositoryError::connection(err.to_string()))?;
            let connection: &mut PgConnection = &mut pooled;
            connection.transaction::<T, RepositoryError, _>(|tx| {
                if let Some(millis) = timeout_ms {
                    // SET does not accept bind parameters; the value is an integer.
                    diesel::sql_query(format!("SET LOCAL statement_timeout = {millis}"))
                        .execute(tx)?;
                }
                work(tx)
            })
        })
        .await
        .map_err(|err| RepositoryError::connection(format!("task join error: {err}")))?
    }
}
