//! Database value types
//!
//! This module defines the types that can be stored and retrieved from databases.

use super::error::{DatabaseError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Database value that can hold different types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DatabaseValue {
    /// Null value
    Null,
    /// Boolean value
    Bool(bool),
    /// 32-bit integer
    Int(i32),
    /// 64-bit integer
    Long(i64),
    /// 64-bit floating point
    Double(f64),
    /// String value
    String(String),
}

impl DatabaseValue {
    /// Get the value as a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            DatabaseValue::Bool(v) => Some(*v),
            DatabaseValue::Int(v) => Some(*v != 0),
            DatabaseValue::Long(v) => Some(*v != 0),
            _ => None,
        }
    }

    /// Get the value as an i32
    pub fn as_int(&self) -> Option<i32> {
        match self {
            DatabaseValue::Int(v) => Some(*v),
            DatabaseValue::Long(v) => i32::try_from(*v).ok(),
            DatabaseValue::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    /// Get the value as an i64
    pub fn as_long(&self) -> Option<i64> {
        match self {
            DatabaseValue::Long(v) => Some(*v),
            DatabaseValue::Int(v) => Some(*v as i64),
            DatabaseValue::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    /// Get the value as an f64
    pub fn as_double(&self) -> Option<f64> {
        match self {
            DatabaseValue::Double(v) => Some(*v),
            DatabaseValue::Int(v) => Some(*v as f64),
            DatabaseValue::Long(v) => Some(*v as f64),
            DatabaseValue::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    /// Get the value as a string (zero-copy for String values)
    pub fn as_str(&self) -> Option<&str> {
        match self {
            DatabaseValue::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, DatabaseValue::Null)
    }

    /// Get the type name of this value
    pub fn type_name(&self) -> &'static str {
        match self {
            DatabaseValue::Null => "null",
            DatabaseValue::Bool(_) => "bool",
            DatabaseValue::Int(_) => "int",
            DatabaseValue::Long(_) => "long",
            DatabaseValue::Double(_) => "double",
            DatabaseValue::String(_) => "string",
        }
    }
}

impl From<bool> for DatabaseValue {
    fn from(v: bool) -> Self {
        DatabaseValue::Bool(v)
    }
}

impl From<i32> for DatabaseValue {
    fn from(v: i32) -> Self {
        DatabaseValue::Int(v)
    }
}

impl From<i64> for DatabaseValue {
    fn from(v: i64) -> Self {
        DatabaseValue::Long(v)
    }
}

impl From<f64> for DatabaseValue {
    fn from(v: f64) -> Self {
        DatabaseValue::Double(v)
    }
}

impl From<String> for DatabaseValue {
    fn from(v: String) -> Self {
        DatabaseValue::String(v)
    }
}

impl From<&str> for DatabaseValue {
    fn from(v: &str) -> Self {
        DatabaseValue::String(v.to_string())
    }
}

impl<T: Into<DatabaseValue>> From<Option<T>> for DatabaseValue {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(val) => val.into(),
            None => DatabaseValue::Null,
        }
    }
}

/// A row of database results (column name -> value mapping)
pub type DatabaseRow = HashMap<String, DatabaseValue>;

/// Multiple rows returned from a query
pub type DatabaseResult = Vec<DatabaseRow>;

/// Typed column access on a [`DatabaseRow`]
pub trait RowExt {
    /// Get a column, failing if the query did not select it
    fn column(&self, name: &str) -> Result<&DatabaseValue>;

    /// Get a non-null integer column
    fn int(&self, name: &str) -> Result<i32>;

    /// Get a non-null 64-bit integer column
    fn long(&self, name: &str) -> Result<i64>;

    /// Get a non-null floating point column
    fn double(&self, name: &str) -> Result<f64>;

    /// Get a non-null boolean column
    fn boolean(&self, name: &str) -> Result<bool>;

    /// Get a non-null text column
    fn text(&self, name: &str) -> Result<String>;
}

impl RowExt for DatabaseRow {
    fn column(&self, name: &str) -> Result<&DatabaseValue> {
        self.get(name)
            .ok_or_else(|| DatabaseError::ColumnNotFound(name.to_string()))
    }

    fn int(&self, name: &str) -> Result<i32> {
        let value = self.column(name)?;
        value
            .as_int()
            .ok_or_else(|| DatabaseError::type_mismatch("int", value.type_name()))
    }

    fn long(&self, name: &str) -> Result<i64> {
        let value = self.column(name)?;
        value
            .as_long()
            .ok_or_else(|| DatabaseError::type_mismatch("long", value.type_name()))
    }

    fn double(&self, name: &str) -> Result<f64> {
        let value = self.column(name)?;
        value
            .as_double()
            .ok_or_else(|| DatabaseError::type_mismatch("double", value.type_name()))
    }

    fn boolean(&self, name: &str) -> Result<bool> {
        let value = self.column(name)?;
        value
            .as_bool()
            .ok_or_else(|| DatabaseError::type_mismatch("bool", value.type_name()))
    }

    fn text(&self, name: &str) -> Result<String> {
        let value = self.column(name)?;
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| DatabaseError::type_mismatch("string", value.type_name()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_conversions() {
        let val = DatabaseValue::Int(42);
        assert_eq!(val.as_int(), Some(42));
        assert_eq!(val.as_long(), Some(42));
        assert_eq!(val.as_double(), Some(42.0));

        let val = DatabaseValue::Long(i64::MAX);
        assert_eq!(val.as_int(), None);

        let val = DatabaseValue::String("123".to_string());
        assert_eq!(val.as_int(), Some(123));

        let val = DatabaseValue::Bool(true);
        assert_eq!(val.as_bool(), Some(true));
    }

    #[test]
    fn test_value_from_types() {
        let val: DatabaseValue = 42.into();
        assert_eq!(val, DatabaseValue::Int(42));

        let val: DatabaseValue = "hello".into();
        assert_eq!(val, DatabaseValue::String("hello".to_string()));

        let val: DatabaseValue = Some(42).into();
        assert_eq!(val, DatabaseValue::Int(42));

        let val: DatabaseValue = Option::<i32>::None.into();
        assert_eq!(val, DatabaseValue::Null);
    }

    #[test]
    fn test_row_access() {
        let mut row = DatabaseRow::new();
        row.insert("disk_id".to_string(), DatabaseValue::Int(3));
        row.insert("total".to_string(), DatabaseValue::Long(120));
        row.insert("company".to_string(), DatabaseValue::String("DELL".to_string()));
        row.insert("avg".to_string(), DatabaseValue::Null);

        assert_eq!(row.int("disk_id").unwrap(), 3);
        assert_eq!(row.long("total").unwrap(), 120);
        assert_eq!(row.text("company").unwrap(), "DELL");
        assert!(matches!(
            row.int("missing"),
            Err(DatabaseError::ColumnNotFound(_))
        ));
        assert!(matches!(
            row.double("avg"),
            Err(DatabaseError::TypeMismatch { .. })
        ));
    }
}
