//! Photo entity

use crate::core::{DatabaseRow, DatabaseValue, Result, RowExt};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A row of the Photos relation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Photo {
    /// Primary key, must be positive
    pub photo_id: i32,
    pub description: String,
    /// Size in bytes, must not be negative
    pub size: i32,
}

impl Photo {
    /// Create a new photo
    pub fn new(photo_id: i32, description: impl Into<String>, size: i32) -> Self {
        Self {
            photo_id,
            description: description.into(),
            size,
        }
    }

    /// Build a photo from a row selecting `photo_id, description, size`
    pub fn from_row(row: &DatabaseRow) -> Result<Self> {
        Ok(Self {
            photo_id: row.int("photo_id")?,
            description: row.text("description")?,
            size: row.int("size")?,
        })
    }

    /// Insert parameters in column order
    pub(crate) fn params(&self) -> [DatabaseValue; 3] {
        [
            self.photo_id.into(),
            self.description.as_str().into(),
            self.size.into(),
        ]
    }
}

impl fmt::Display for Photo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "photoID={}, description={}, size={}",
            self.photo_id, self.description, self.size
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_photo_display() {
        let photo = Photo::new(1, "Tree", 10);
        assert_eq!(photo.to_string(), "photoID=1, description=Tree, size=10");
    }

    #[test]
    fn test_photo_from_row() {
        let mut row = DatabaseRow::new();
        row.insert("photo_id".into(), DatabaseValue::Int(4));
        row.insert("description".into(), DatabaseValue::String("Sea".into()));
        row.insert("size".into(), DatabaseValue::Int(0));

        assert_eq!(Photo::from_row(&row).unwrap(), Photo::new(4, "Sea", 0));

        row.remove("size");
        assert!(Photo::from_row(&row).is_err());
    }
}
