//! Database trait and connection management
//!
//! This module defines the core database trait the store runs on, and the
//! builder that turns settings into a connection string.

use super::error::{DatabaseError, Result};
use super::value::{DatabaseResult, DatabaseValue};
use async_trait::async_trait;
use std::collections::BTreeMap;

/// Core database trait that all database backends must implement
#[async_trait]
pub trait Database: Send + Sync {
    /// Connect to the database with the given connection string
    async fn connect(&self, connection_string: &str) -> Result<()>;

    /// Check if connected to the database
    fn is_connected(&self) -> bool;

    /// Disconnect from the database
    async fn disconnect(&self) -> Result<()>;

    /// Execute a single statement that doesn't return results
    ///
    /// # Security Warning
    ///
    /// **SQL Injection Risk**: This method executes raw SQL without parameter sanitization.
    /// Use `execute_with_params()` for anything carrying caller values.
    async fn execute(&self, query: &str) -> Result<u64>;

    /// Execute several semicolon-separated statements (DDL scripts)
    async fn batch_execute(&self, script: &str) -> Result<()>;

    /// Execute a SELECT query and return results
    async fn query(&self, query: &str) -> Result<DatabaseResult>;

    /// Execute a query with parameters (prepared statement)
    ///
    /// Placeholders are `$1`, `$2`, ... in PostgreSQL syntax.
    async fn query_with_params(
        &self,
        query: &str,
        params: &[DatabaseValue],
    ) -> Result<DatabaseResult>;

    /// Execute a statement with parameters, returning the affected row count
    async fn execute_with_params(&self, query: &str, params: &[DatabaseValue]) -> Result<u64>;

    /// Begin a transaction
    async fn begin_transaction(&self) -> Result<()>;

    /// Commit the current transaction
    async fn commit(&self) -> Result<()>;

    /// Rollback the current transaction
    async fn rollback(&self) -> Result<()>;

    /// Check if currently in a transaction
    fn in_transaction(&self) -> bool;
}

/// PostgreSQL connection builder
#[derive(Debug, Clone, Default)]
pub struct ConnectionBuilder {
    url: Option<String>,
    host: Option<String>,
    port: Option<u16>,
    database: Option<String>,
    username: Option<String>,
    password: Option<String>,
    options: BTreeMap<String, String>,
}

impl ConnectionBuilder {
    /// Default PostgreSQL port
    pub const DEFAULT_PORT: u16 = 5432;

    /// Create an empty connection builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a complete connection string (URL or key/value form) verbatim
    pub fn url<S: Into<String>>(mut self, url: S) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set the database host
    pub fn host<S: Into<String>>(mut self, host: S) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Set the database port
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the database name
    pub fn database<S: Into<String>>(mut self, database: S) -> Self {
        self.database = Some(database.into());
        self
    }

    /// Set the username
    pub fn username<S: Into<String>>(mut self, username: S) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Set the password
    pub fn password<S: Into<String>>(mut self, password: S) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Add a custom option
    pub fn option<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Build settings from the process environment
    ///
    /// `POSTGRES_URL` wins when present. Otherwise the libpq variables
    /// `PGHOST`, `PGPORT`, `PGDATABASE`, `PGUSER` and `PGPASSWORD` are read,
    /// defaulting to `localhost:5432`, database and user `postgres`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("POSTGRES_URL").filter(|u| !u.trim().is_empty()) {
            return Ok(Self::new().url(url));
        }

        let port = match lookup("PGPORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| {
                DatabaseError::InvalidConnectionString(format!("PGPORT is not a port: '{}'", raw))
            })?,
            None => Self::DEFAULT_PORT,
        };

        let mut builder = Self::new()
            .host(lookup("PGHOST").unwrap_or_else(|| "localhost".to_string()))
            .port(port)
            .database(lookup("PGDATABASE").unwrap_or_else(|| "postgres".to_string()))
            .username(lookup("PGUSER").unwrap_or_else(|| "postgres".to_string()));
        if let Some(password) = lookup("PGPASSWORD") {
            builder = builder.password(password);
        }
        Ok(builder)
    }

    /// Build the connection string
    pub fn build_connection_string(&self) -> String {
        if let Some(url) = &self.url {
            return url.clone();
        }

        let mut parts = Vec::new();
        if let Some(host) = &self.host {
            parts.push(format!("host={}", host));
        }
        if let Some(port) = self.port {
            parts.push(format!("port={}", port));
        }
        if let Some(database) = &self.database {
            parts.push(format!("dbname={}", database));
        }
        if let Some(username) = &self.username {
            parts.push(format!("user={}", username));
        }
        if let Some(password) = &self.password {
            parts.push(format!("password={}", password));
        }
        for (key, value) in &self.options {
            parts.push(format!("{}={}", key, value));
        }
        parts.join(" ")
    }
}
