//! Data-access layer
//!
//! [`PhotoStore`] exposes one async method per logical operation. Each call
//! opens its own connection, runs its statements (inside a transaction when
//! it writes), and collapses any failure into a [`ReturnValue`] or a
//! documented default value, so nothing escapes the call as an error.

mod analytics;
mod disks;
mod photos;
mod placement;
mod rams;

use crate::backends::PostgresDatabase;
use crate::core::{
    ConnectionBuilder, Database, DatabaseResult, DatabaseValue, Result, ReturnValue, RowExt,
    TransactionGuard,
};
use crate::schema;

/// Entry point for every store operation
#[derive(Debug, Clone)]
pub struct PhotoStore {
    connection_string: String,
}

impl PhotoStore {
    /// Create a store connecting with the given settings
    pub fn new(settings: &ConnectionBuilder) -> Self {
        Self {
            connection_string: settings.build_connection_string(),
        }
    }

    /// Create a store from `POSTGRES_URL` or the `PG*` environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(&ConnectionBuilder::from_env()?))
    }

    async fn open(&self) -> Result<PostgresDatabase> {
        PostgresDatabase::open(&self.connection_string).await
    }

    /// Create every table and view in one transaction
    pub async fn create_tables(&self) -> Result<()> {
        let db = self.open().await?;
        schema::create_tables(&db).await
    }

    /// Delete every row from every table
    pub async fn clear_tables(&self) -> Result<()> {
        let db = self.open().await?;
        schema::clear_tables(&db).await
    }

    /// Drop every view and table that exists
    pub async fn drop_tables(&self) -> Result<()> {
        let db = self.open().await?;
        schema::drop_tables(&db).await
    }

    /// Run one read-only SELECT on a fresh connection
    async fn fetch(&self, query: &str, params: &[DatabaseValue]) -> Result<DatabaseResult> {
        let db = self.open().await?;
        db.query_with_params(query, params).await
    }

    /// Run one or more statements in a single transaction
    async fn write(&self, statements: &[(&str, &[DatabaseValue])]) -> Result<ReturnValue> {
        let db = self.open().await?;
        let tx = TransactionGuard::begin(&db).await?;
        let result: Result<()> = async {
            for (query, params) in statements {
                tx.execute_with_params(query, params).await?;
            }
            Ok(())
        }
        .await;
        tx.finish(result).await?;
        Ok(ReturnValue::Ok)
    }
}

/// Commit when exactly one row was affected, otherwise roll back
///
/// Zero (or several) affected rows reports `NotExists`.
async fn expect_single_row<D: Database>(
    tx: TransactionGuard<'_, D>,
    affected: Result<u64>,
) -> Result<ReturnValue> {
    match affected {
        Ok(1) => {
            tx.commit().await?;
            Ok(ReturnValue::Ok)
        }
        Ok(count) => {
            tracing::debug!(count, "unexpected affected row count, rolling back");
            tx.rollback().await?;
            Ok(ReturnValue::NotExists)
        }
        Err(err) => tx.finish(Err(err)).await,
    }
}

/// Unwrap a read result, logging and substituting `fallback` on failure
fn settle<T>(operation: &'static str, result: Result<T>, fallback: T) -> T {
    match result {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(operation, error = %err, "query failed");
            fallback
        }
    }
}

/// Collect one integer id column from every row
fn id_column(rows: &DatabaseResult, column: &str) -> Result<Vec<i32>> {
    rows.iter().map(|row| row.int(column)).collect()
}
