//! Scratch-schema helpers for `PostgreSQL` integration tests.
//!
//! Tests run only when `JAG_ATLAS_TEST_DATABASE_URL` points at a server the
//! test user may create schemas on. Each test gets its own schema, selected
//! through the connection's `search_path`, so tests never share tables.

use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use jag_atlas::http::AppState;
use jag_atlas::persistence::{PgStore, build_pool};
use uuid::Uuid;

/// Environment variable naming the test server.
pub const DATABASE_ENV: &str = "JAG_ATLAS_TEST_DATABASE_URL";

/// Boxed error type for fallible helpers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A schema that is dropped again when the value goes out of scope.
pub struct ScratchSchema {
    admin_url: String,
    schema: String,
    /// Services wired over the scratch schema, tables created.
    pub state: AppState,
}

impl ScratchSchema {
    /// Creates a scratch schema, or returns `None` when no server is configured.
    ///
    /// # Errors
    ///
    /// Returns an error when the server rejects the connection or the DDL.
    pub async fn create() -> Result<Option<Self>, BoxError> {
        let Ok(admin_url) = std::env::var(DATABASE_ENV) else {
            return Ok(None);
        };
        let schema = format!("jag_atlas_{}", Uuid::new_v4().simple());
        let mut admin = PgConnection::establish(&admin_url)?;
        admin.batch_execute(&format!("CREATE SCHEMA {schema}"))?;

        let separator = if admin_url.contains('?') { '&' } else { '?' };
        let scoped_url = format!("{admin_url}{separator}options=-csearch_path%3D{schema}");
        let store = PgStore::new(build_pool(&scoped_url, 4)?);
        let state = AppState::postgres(&store);
        state.schema.create_tables().await?;

        Ok(Some(Self {
            admin_url,
            schema,
            state,
        }))
    }
}

impl Drop for ScratchSchema {
    fn drop(&mut self) {
        let dropped = PgConnection::establish(&self.admin_url).map(|mut admin| {
            admin.batch_execute(&format!("DROP SCHEMA IF EXISTS {} CASCADE", self.schema))
        });
        if !matches!(dropped, Ok(Ok(()))) {
            tracing::warn!(schema = %self.schema, "scratch schema left behind");
        }
    }
}

/// Binds a scratch schema or ends the test early when none is configured.
#[macro_export]
macro_rules! scratch_or_skip {
    () => {
        match $crate::postgres::helpers::ScratchSchema::create().await? {
            Some(scratch) => scratch,
            None => {
                tracing::info!("{} not set, skipping", $crate::postgres::helpers::DATABASE_ENV);
                return Ok(());
            }
        }
    };
}
