//! Database backend implementations
//!
//! This module contains concrete implementations of the Database trait.

pub mod postgres;

pub use postgres::PostgresDatabase;
