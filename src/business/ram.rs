//! RAM entity

use crate::core::{DatabaseRow, DatabaseValue, Result, RowExt};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A row of the RAMs relation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ram {
    pub ram_id: i32,
    pub company: String,
    pub size: i32,
}

impl Ram {
    pub fn new(ram_id: i32, company: impl Into<String>, size: i32) -> Self {
        Self {
            ram_id,
            company: company.into(),
            size,
        }
    }

    pub fn from_row(row: &DatabaseRow) -> Result<Self> {
        Ok(Self {
            ram_id: row.int("ram_id")?,
            company: row.text("company")?,
            size: row.int("size")?,
        })
    }

    pub(crate) fn params(&self) -> [DatabaseValue; 3] {
        [
            self.ram_id.into(),
            self.company.as_str().into(),
            self.size.into(),
        ]
    }
}

impl fmt::Display for Ram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RamID={}, company={}, size={}",
            self.ram_id, self.company, self.size
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ram_display() {
        assert_eq!(
            Ram::new(3, "Kingston", 16).to_string(),
            "RamID=3, company=Kingston, size=16"
        );
    }
}
