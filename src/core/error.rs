//! Error types for the database system
//!
//! This module defines all error types that can occur during database operations,
//! including the classification of PostgreSQL constraint violations.

use std::fmt;
use tokio_postgres::error::SqlState;

/// Result type alias for database operations
pub type Result<T> = std::result::Result<T, DatabaseError>;

/// Integrity constraint classes reported by PostgreSQL (SQLSTATE class 23)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Violation {
    /// A NOT NULL column received NULL (23502)
    NotNull,
    /// A CHECK predicate evaluated to false (23514)
    Check,
    /// A primary key or UNIQUE index already holds the value (23505)
    Unique,
    /// A referenced row does not exist (23503)
    ForeignKey,
}

impl Violation {
    /// Classify a SQLSTATE, returning `None` for anything outside the four
    /// integrity violations this crate distinguishes
    pub fn from_sqlstate(state: &SqlState) -> Option<Self> {
        if *state == SqlState::NOT_NULL_VIOLATION {
            Some(Violation::NotNull)
        } else if *state == SqlState::CHECK_VIOLATION {
            Some(Violation::Check)
        } else if *state == SqlState::UNIQUE_VIOLATION {
            Some(Violation::Unique)
        } else if *state == SqlState::FOREIGN_KEY_VIOLATION {
            Some(Violation::ForeignKey)
        } else {
            None
        }
    }

    /// Classify a raw five-character SQLSTATE code
    pub fn from_code(code: &str) -> Option<Self> {
        Self::from_sqlstate(&SqlState::from_code(code))
    }

    /// Get the name PostgreSQL uses for this condition
    pub fn to_str(&self) -> &'static str {
        match self {
            Violation::NotNull => "not_null_violation",
            Violation::Check => "check_violation",
            Violation::Unique => "unique_violation",
            Violation::ForeignKey => "foreign_key_violation",
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

fn on_constraint(constraint: &Option<String>) -> String {
    constraint
        .as_deref()
        .map(|name| format!(" on {}", name))
        .unwrap_or_default()
}

/// Error types for database operations
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// Connection error (generic)
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Connection timeout
    #[error("Connection timeout after {timeout_ms}ms")]
    ConnectionTimeout { timeout_ms: u64 },

    /// Query execution error
    #[error("Query execution error: {0}")]
    QueryError(String),

    /// Query timeout
    #[error("Query timeout after {timeout_ms}ms")]
    QueryTimeout { timeout_ms: u64 },

    /// Integrity constraint violation
    #[error("Constraint violation ({violation}{}): {message}", on_constraint(.constraint))]
    ConstraintViolation {
        violation: Violation,
        constraint: Option<String>,
        message: String,
    },

    /// Type conversion error
    #[error("Type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: String, actual: String },

    /// Invalid connection string
    #[error("Invalid connection string: {0}")]
    InvalidConnectionString(String),

    /// Column not found
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    /// Transaction error
    #[error("Transaction error: {0}")]
    TransactionError(String),
}

impl DatabaseError {
    /// Create a new connection error (generic)
    pub fn connection<S: Into<String>>(msg: S) -> Self {
        DatabaseError::ConnectionError(msg.into())
    }

    /// Create a connection timeout error
    pub fn connection_timeout(timeout_ms: u64) -> Self {
        DatabaseError::ConnectionTimeout { timeout_ms }
    }

    /// Create a new query error
    pub fn query<S: Into<String>>(msg: S) -> Self {
        DatabaseError::QueryError(msg.into())
    }

    /// Create a query timeout error
    pub fn query_timeout(timeout_ms: u64) -> Self {
        DatabaseError::QueryTimeout { timeout_ms }
    }

    /// Create a constraint violation error
    pub fn violation<S: Into<String>>(violation: Violation, message: S) -> Self {
        DatabaseError::ConstraintViolation {
            violation,
            constraint: None,
            message: message.into(),
        }
    }

    /// Create a new type mismatch error
    pub fn type_mismatch(expected: &str, actual: &str) -> Self {
        DatabaseError::TypeMismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    /// Create a new transaction error
    pub fn transaction<S: Into<String>>(msg: S) -> Self {
        DatabaseError::TransactionError(msg.into())
    }

    /// Classify a driver error by its SQLSTATE
    ///
    /// Integrity violations keep their class and constraint name, a closed
    /// connection or a class 08 state becomes a connection error, and
    /// everything else is a query error.
    pub fn from_postgres(err: tokio_postgres::Error) -> Self {
        if let Some(db_err) = err.as_db_error() {
            if let Some(violation) = Violation::from_sqlstate(db_err.code()) {
                return DatabaseError::ConstraintViolation {
                    violation,
                    constraint: db_err.constraint().map(str::to_string),
                    message: db_err.message().to_string(),
                };
            }
            if db_err.code().code().starts_with("08") {
                return DatabaseError::connection(db_err.message());
            }
            return DatabaseError::query(db_err.message());
        }

        if err.is_closed() {
            return DatabaseError::connection(err.to_string());
        }
        DatabaseError::query(err.to_string())
    }

    /// The integrity violation behind this error, if any
    pub fn violation_kind(&self) -> Option<Violation> {
        match self {
            DatabaseError::ConstraintViolation { violation, .. } => Some(*violation),
            _ => None,
        }
    }

    /// Whether the error means the database could not be reached
    pub fn is_connection(&self) -> bool {
        matches!(
            self,
            DatabaseError::ConnectionError(_) | DatabaseError::ConnectionTimeout { .. }
        )
    }
}
