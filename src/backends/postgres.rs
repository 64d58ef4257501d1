//! PostgreSQL database backend implementation
//!
//! This module provides a PostgreSQL implementation of the Database trait using tokio-postgres.

use crate::core::{
    database::Database, error::DatabaseError, error::Result, value::DatabaseResult,
    value::DatabaseRow, value::DatabaseValue,
};
use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio_postgres::types::ToSql;
use tokio_postgres::{Client, NoTls, Row};

/// Default timeout for database operations (30 seconds)
const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(30);

/// PostgreSQL database implementation
pub struct PostgresDatabase {
    client: Arc<Mutex<Option<Client>>>,
    in_transaction: Arc<Mutex<bool>>,
}

impl PostgresDatabase {
    /// Create a new PostgreSQL database instance
    pub fn new() -> Self {
        Self {
            client: Arc::new(Mutex::new(None)),
            in_transaction: Arc::new(Mutex::new(false)),
        }
    }

    /// Create an instance and connect it in one step
    pub async fn open(connection_string: &str) -> Result<Self> {
        let db = Self::new();
        db.connect(connection_string).await?;
        Ok(db)
    }

    /// Convert a tokio_postgres Row to a DatabaseRow
    fn row_to_database_row(row: &Row) -> Result<DatabaseRow> {
        let mut db_row = DatabaseRow::new();

        for (idx, column) in row.columns().iter().enumerate() {
            let type_name = column.type_().name();
            let value = match type_name {
                "bool" => row
                    .try_get::<_, Option<bool>>(idx)
                    .map(|v| v.map(DatabaseValue::Bool)),
                "int2" => row
                    .try_get::<_, Option<i16>>(idx)
                    .map(|v| v.map(|n| DatabaseValue::Int(n as i32))),
                "int4" => row
                    .try_get::<_, Option<i32>>(idx)
                    .map(|v| v.map(DatabaseValue::Int)),
                "int8" => row
                    .try_get::<_, Option<i64>>(idx)
                    .map(|v| v.map(DatabaseValue::Long)),
                "float4" => row
                    .try_get::<_, Option<f32>>(idx)
                    .map(|v| v.map(|n| DatabaseValue::Double(n as f64))),
                "float8" => row
                    .try_get::<_, Option<f64>>(idx)
                    .map(|v| v.map(DatabaseValue::Double)),
                "text" | "varchar" | "char" | "bpchar" | "name" => row
                    .try_get::<_, Option<String>>(idx)
                    .map(|v| v.map(DatabaseValue::String)),
                other => return Err(DatabaseError::type_mismatch("supported column type", other)),
            }
            .map_err(|_| DatabaseError::type_mismatch(type_name, "undecodable value"))?;

            db_row.insert(
                column.name().to_string(),
                value.unwrap_or(DatabaseValue::Null),
            );
        }

        Ok(db_row)
    }

    /// Convert DatabaseValue to postgres parameter
    ///
    /// Every column in the schema is NOT NULL, and an untyped NULL cannot be
    /// bound to an arbitrary column type, so `Null` is rejected.
    fn value_to_param(value: &DatabaseValue) -> Result<Box<dyn ToSql + Sync + Send>> {
        Ok(match value {
            DatabaseValue::Null => {
                return Err(DatabaseError::type_mismatch("non-null parameter", "null"))
            }
            DatabaseValue::Bool(v) => Box::new(*v),
            DatabaseValue::Int(v) => Box::new(*v),
            DatabaseValue::Long(v) => Box::new(*v),
            DatabaseValue::Double(v) => Box::new(*v),
            DatabaseValue::String(v) => Box::new(v.clone()),
        })
    }

    /// Run a driver future under the operation timeout, classifying its error
    async fn timed<T, F>(future: F) -> Result<T>
    where
        F: Future<Output = std::result::Result<T, tokio_postgres::Error>>,
    {
        tokio::time::timeout(DEFAULT_OPERATION_TIMEOUT, future)
            .await
            .map_err(|_| DatabaseError::query_timeout(DEFAULT_OPERATION_TIMEOUT.as_millis() as u64))?
            .map_err(DatabaseError::from_postgres)
    }

    async fn control(&self, statement: &str, expect_open: bool) -> Result<()> {
        let mut in_transaction = self.in_transaction.lock().await;

        if *in_transaction != expect_open {
            return Err(DatabaseError::transaction(if expect_open {
                "Not in a transaction"
            } else {
                "Already in a transaction"
            }));
        }

        let client = self.client.lock().await;
        let client = client
            .as_ref()
            .ok_or_else(|| DatabaseError::connection("Not connected to database"))?;

        let outcome = Self::timed(client.batch_execute(statement)).await;
        // A failed COMMIT or ROLLBACK still ends the transaction server-side.
        if outcome.is_ok() || expect_open {
            *in_transaction = !expect_open;
        }
        outcome
    }
}

impl Default for PostgresDatabase {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Database for PostgresDatabase {
    async fn connect(&self, connection_string: &str) -> Result<()> {
        // Clean up any existing connection first
        {
            let mut client = self.client.lock().await;
            *client = None;
        }
        {
            let mut in_transaction = self.in_transaction.lock().await;
            *in_transaction = false;
        }

        let connection_string = connection_string.to_string();
        let client_arc = Arc::clone(&self.client);

        let connect_future = async move {
            let (client, connection) = tokio_postgres::connect(&connection_string, NoTls)
                .await
                .map_err(|e| DatabaseError::connection(e.to_string()))?;

            // Spawn the connection handler in the background
            tokio::spawn(async move {
                if let Err(e) = connection.await {
                    tracing::warn!(error = %e, "PostgreSQL connection error");
                }
            });

            let mut client_guard = client_arc.lock().await;
            *client_guard = Some(client);

            Ok::<(), DatabaseError>(())
        };

        tokio::time::timeout(DEFAULT_OPERATION_TIMEOUT, connect_future)
            .await
            .map_err(|_| {
                DatabaseError::connection_timeout(DEFAULT_OPERATION_TIMEOUT.as_millis() as u64)
            })??;

        tracing::debug!("connected to PostgreSQL");
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.client
            .try_lock()
            .map(|client| client.as_ref().map(|c| !c.is_closed()).unwrap_or(false))
            .unwrap_or(false)
    }

    async fn disconnect(&self) -> Result<()> {
        {
            let mut in_transaction = self.in_transaction.lock().await;
            *in_transaction = false;
        }

        let mut client = self.client.lock().await;
        *client = None;
        Ok(())
    }

    async fn execute(&self, query: &str) -> Result<u64> {
        self.execute_with_params(query, &[]).await
    }

    async fn batch_execute(&self, script: &str) -> Result<()> {
        let client = self.client.lock().await;
        let client = client
            .as_ref()
            .ok_or_else(|| DatabaseError::connection("Not connected to database"))?;

        Self::timed(client.batch_execute(script)).await
    }

    async fn query(&self, query: &str) -> Result<DatabaseResult> {
        self.query_with_params(query, &[]).await
    }

    async fn query_with_params(
        &self,
        query: &str,
        params: &[DatabaseValue],
    ) -> Result<DatabaseResult> {
        let client = self.client.lock().await;
        let client = client
            .as_ref()
            .ok_or_else(|| DatabaseError::connection("Not connected to database"))?;

        let postgres_params: Vec<Box<dyn ToSql + Sync + Send>> = params
            .iter()
            .map(Self::value_to_param)
            .collect::<Result<_>>()?;
        let param_refs: Vec<&(dyn ToSql + Sync)> = postgres_params
            .iter()
            .map(|p| p.as_ref() as &(dyn ToSql + Sync))
            .collect();

        let rows = Self::timed(client.query(query, &param_refs)).await?;

        rows.iter().map(Self::row_to_database_row).collect()
    }

    async fn execute_with_params(&self, query: &str, params: &[DatabaseValue]) -> Result<u64> {
        let client = self.client.lock().await;
        let client = client
            .as_ref()
            .ok_or_else(|| DatabaseError::connection("Not connected to database"))?;

        let postgres_params: Vec<Box<dyn ToSql + Sync + Send>> = params
            .iter()
            .map(Self::value_to_param)
            .collect::<Result<_>>()?;
        let param_refs: Vec<&(dyn ToSql + Sync)> = postgres_params
            .iter()
            .map(|p| p.as_ref() as &(dyn ToSql + Sync))
            .collect();

        Self::timed(client.execute(query, &param_refs)).await
    }

    async fn begin_transaction(&self) -> Result<()> {
        self.control("BEGIN", false).await
    }

    async fn commit(&self) -> Result<()> {
        self.control("COMMIT", true).await
    }

    async fn rollback(&self) -> Result<()> {
        self.control("ROLLBACK", true).await
    }

    fn in_transaction(&self) -> bool {
        self.in_transaction
            .try_lock()
            .map(|guard| *guard)
            .unwrap_or(false)
    }
}
