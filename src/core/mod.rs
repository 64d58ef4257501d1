//! Core database system types and traits
//!
//! This module provides the fundamental building blocks for the store,
//! including error types, result codes, the database trait, value types,
//! and connection settings.

pub mod database;
pub mod error;
pub mod return_value;
pub mod transaction;
pub mod value;

// Re-export commonly used types
pub use database::{ConnectionBuilder, Database};
pub use error::{DatabaseError, Result, Violation};
pub use return_value::ReturnValue;
pub use transaction::TransactionGuard;
pub use value::{DatabaseResult, DatabaseRow, DatabaseValue, RowExt};
