//! Disk entity

use crate::core::{DatabaseRow, DatabaseValue, Result, RowExt};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A row of the Disks relation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Disk {
    pub disk_id: i32,
    pub company: String,
    pub speed: i32,
    /// Remaining capacity; placing a photo consumes its size
    pub free_space: i32,
    /// Cost per byte stored
    pub cost: i32,
}

impl Disk {
    /// Create a new disk
    pub fn new(
        disk_id: i32,
        company: impl Into<String>,
        speed: i32,
        free_space: i32,
        cost: i32,
    ) -> Self {
        Self {
            disk_id,
            company: company.into(),
            speed,
            free_space,
            cost,
        }
    }

    /// Build a disk from a row selecting every Disks column
    pub fn from_row(row: &DatabaseRow) -> Result<Self> {
        Ok(Self {
            disk_id: row.int("disk_id")?,
            company: row.text("company")?,
            speed: row.int("speed")?,
            free_space: row.int("free_space")?,
            cost: row.int("cost")?,
        })
    }

    pub(crate) fn params(&self) -> [DatabaseValue; 5] {
        [
            self.disk_id.into(),
            self.company.as_str().into(),
            self.speed.into(),
            self.free_space.into(),
            self.cost.into(),
        ]
    }
}

impl fmt::Display for Disk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DiskID={}, company={}, speed={}, free space={}, cost={}",
            self.disk_id, self.company, self.speed, self.free_space, self.cost
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disk_display() {
        let disk = Disk::new(1, "DELL", 10, 100, 3);
        assert_eq!(
            disk.to_string(),
            "DiskID=1, company=DELL, speed=10, free space=100, cost=3"
        );
    }

    #[test]
    fn test_disk_params_order() {
        let disk = Disk::new(2, "HP", 5, 50, 1);
        assert_eq!(
            disk.params(),
            [
                DatabaseValue::Int(2),
                DatabaseValue::String("HP".into()),
                DatabaseValue::Int(5),
                DatabaseValue::Int(50),
                DatabaseValue::Int(1),
            ]
        );
    }
}
