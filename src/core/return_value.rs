//! Caller-facing result codes
//!
//! Every mutating store operation reports one of these codes instead of an
//! error. This module holds the mapping from [`DatabaseError`] to codes.

use super::error::{DatabaseError, Result, Violation};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Outcome of a store operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReturnValue {
    /// The operation succeeded
    Ok,
    /// Database failure not covered by a more specific code
    Error,
    /// A value broke a check constraint
    BadParams,
    /// The key is already present
    AlreadyExists,
    /// A referenced or targeted row does not exist
    NotExists,
}

impl ReturnValue {
    /// Convert the code to its canonical upper-case name
    pub fn to_str(&self) -> &'static str {
        match self {
            ReturnValue::Ok => "OK",
            ReturnValue::Error => "ERROR",
            ReturnValue::BadParams => "BAD_PARAMS",
            ReturnValue::AlreadyExists => "ALREADY_EXISTS",
            ReturnValue::NotExists => "NOT_EXISTS",
        }
    }

    /// Map an integrity violation to its default code
    ///
    /// Unique keys report `AlreadyExists`, check predicates `BadParams`;
    /// NOT NULL and foreign keys fall through to `Error`.
    pub fn from_violation(violation: Violation) -> Self {
        match violation {
            Violation::Unique => ReturnValue::AlreadyExists,
            Violation::Check => ReturnValue::BadParams,
            Violation::NotNull | Violation::ForeignKey => ReturnValue::Error,
        }
    }

    /// Map any database error to its default code
    pub fn from_error(err: &DatabaseError) -> Self {
        err.violation_kind()
            .map(Self::from_violation)
            .unwrap_or(ReturnValue::Error)
    }

    /// Map an error where a foreign key failure means a missing referenced row
    pub fn from_reference_error(err: &DatabaseError) -> Self {
        match err.violation_kind() {
            Some(Violation::ForeignKey) => ReturnValue::NotExists,
            _ => Self::from_error(err),
        }
    }

    /// Collapse an operation result, logging whatever is discarded
    pub(crate) fn from_result(
        operation: &'static str,
        result: Result<ReturnValue>,
        map_err: fn(&DatabaseError) -> ReturnValue,
    ) -> Self {
        match result {
            Ok(code) => {
                tracing::debug!(operation, code = %code, "operation finished");
                code
            }
            Err(err) => {
                let code = map_err(&err);
                tracing::warn!(operation, code = %code, error = %err, "operation failed");
                code
            }
        }
    }
}

impl fmt::Display for ReturnValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for ReturnValue {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "OK" => Ok(ReturnValue::Ok),
            "ERROR" => Ok(ReturnValue::Error),
            "BAD_PARAMS" => Ok(ReturnValue::BadParams),
            "ALREADY_EXISTS" => Ok(ReturnValue::AlreadyExists),
            "NOT_EXISTS" => Ok(ReturnValue::NotExists),
            _ => Err(format!("Invalid return value: '{}'", s)),
        }
    }
}
