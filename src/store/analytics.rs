//! Read-only aggregate queries
//!
//! Each method issues a single SELECT. Empty input yields the zero, empty or
//! false default; a failing query yields -1 for numeric results and the
//! empty/false default otherwise.

use super::{id_column, settle, PhotoStore};
use crate::core::{DatabaseValue, Result, RowExt};

const AVERAGE_PHOTO_SIZE: &str = "SELECT COALESCE(AVG(size), 0)::float8 AS average
    FROM Photos_Stored_On_Disks
    WHERE disk_id = $1";

const TOTAL_RAM: &str = "SELECT COALESCE(SUM(size), 0)::bigint AS total
    FROM Rams_Part_Of_Disks
    WHERE disk_id = $1";

const COST_FOR_DESCRIPTION: &str = "SELECT COALESCE(SUM(p.size::bigint * d.cost), 0)::bigint AS total
    FROM Photos_Stored_On_Disks p
    INNER JOIN Disks d ON p.disk_id = d.disk_id
    WHERE p.description = $1";

const PHOTOS_FITTING_DISK: &str = "SELECT p.photo_id
    FROM Photos p
    INNER JOIN Disks d ON p.size <= d.free_space
    WHERE d.disk_id = $1
    ORDER BY p.photo_id DESC
    LIMIT 5";

const PHOTOS_FITTING_DISK_AND_RAM: &str = "SELECT p.photo_id
    FROM Photos p
    INNER JOIN Disks d ON p.size <= d.free_space
    WHERE d.disk_id = $1
      AND p.size <= (SELECT COALESCE(SUM(r.size), 0)
                     FROM Rams_Part_Of_Disks r
                     WHERE r.disk_id = $1)
    ORDER BY p.photo_id ASC
    LIMIT 5";

// No row at all when the disk is missing.
const COMPANY_EXCLUSIVE: &str = "SELECT NOT EXISTS (
        SELECT 1 FROM Rams_Part_Of_Disks r
        WHERE r.disk_id = d.disk_id AND r.company <> d.company
    ) AS exclusive
    FROM Disks d
    WHERE d.disk_id = $1";

const DISK_WITH_AT_LEAST: &str = "SELECT EXISTS (
        SELECT disk_id
        FROM Photos_Stored_On_Disks
        WHERE description = $1
        GROUP BY disk_id
        HAVING COUNT(*) >= $2::integer
    ) AS found";

const DISKS_BY_STORED_DATA: &str = "SELECT d.disk_id
    FROM Disks d
    LEFT JOIN Photos_Stored_On_Disks p ON p.disk_id = d.disk_id
    GROUP BY d.disk_id
    ORDER BY COALESCE(SUM(p.size), 0) DESC, d.disk_id ASC
    LIMIT 5";

const CONFLICTING_DISKS: &str = "SELECT DISTINCT a.disk_id
    FROM StoredOn a
    INNER JOIN StoredOn b ON a.photo_id = b.photo_id AND a.disk_id <> b.disk_id
    ORDER BY a.disk_id ASC";

const MOST_AVAILABLE_DISKS: &str = "SELECT d.disk_id
    FROM Disks d
    LEFT JOIN Photos p ON p.size <= d.free_space
    GROUP BY d.disk_id, d.speed
    ORDER BY COUNT(p.photo_id) DESC, d.speed DESC, d.disk_id ASC
    LIMIT 5";

// A photo is close when it shares at least half of the target's disks;
// with no disks the threshold is zero and every other photo qualifies.
const CLOSE_PHOTOS: &str = "WITH target_disks AS (
        SELECT disk_id FROM StoredOn WHERE photo_id = $1
    )
    SELECT p.photo_id
    FROM Photos p
    WHERE p.photo_id <> $1
      AND EXISTS (SELECT 1 FROM Photos WHERE photo_id = $1)
      AND 2 * (SELECT COUNT(*)
               FROM StoredOn s
               WHERE s.photo_id = p.photo_id
                 AND s.disk_id IN (SELECT disk_id FROM target_disks))
          >= (SELECT COUNT(*) FROM target_disks)
    ORDER BY p.photo_id ASC
    LIMIT 10";

impl PhotoStore {
    /// Average size of the photos stored on a disk
    pub async fn average_photos_size_on_disk(&self, disk_id: i32) -> f64 {
        let result: Result<f64> = async {
            let rows = self
                .fetch(AVERAGE_PHOTO_SIZE, &[DatabaseValue::Int(disk_id)])
                .await?;
            rows.first().map_or(Ok(0.0), |row| row.double("average"))
        }
        .await;
        settle("average_photos_size_on_disk", result, -1.0)
    }

    /// Total size of the RAM modules installed in a disk
    pub async fn get_total_ram_on_disk(&self, disk_id: i32) -> i64 {
        let result: Result<i64> = async {
            let rows = self.fetch(TOTAL_RAM, &[DatabaseValue::Int(disk_id)]).await?;
            rows.first().map_or(Ok(0), |row| row.long("total"))
        }
        .await;
        settle("get_total_ram_on_disk", result, -1)
    }

    /// Cost of storing every copy of the photos with this description
    ///
    /// Each placement costs the photo size times the disk's cost per byte.
    pub async fn get_cost_for_description(&self, description: &str) -> i64 {
        let result: Result<i64> = async {
            let rows = self
                .fetch(COST_FOR_DESCRIPTION, &[description.into()])
                .await?;
            rows.first().map_or(Ok(0), |row| row.long("total"))
        }
        .await;
        settle("get_cost_for_description", result, -1)
    }

    /// Up to five photos that fit in the disk's free space, highest id first
    pub async fn get_photos_can_be_added_to_disk(&self, disk_id: i32) -> Vec<i32> {
        let result = self
            .fetch(PHOTOS_FITTING_DISK, &[DatabaseValue::Int(disk_id)])
            .await
            .and_then(|rows| id_column(&rows, "photo_id"));
        settle("get_photos_can_be_added_to_disk", result, Vec::new())
    }

    /// Up to five photos that fit both the disk's free space and its total
    /// RAM, lowest id first
    pub async fn get_photos_can_be_added_to_disk_and_ram(&self, disk_id: i32) -> Vec<i32> {
        let result = self
            .fetch(PHOTOS_FITTING_DISK_AND_RAM, &[DatabaseValue::Int(disk_id)])
            .await
            .and_then(|rows| id_column(&rows, "photo_id"));
        settle("get_photos_can_be_added_to_disk_and_ram", result, Vec::new())
    }

    /// Whether every RAM module in the disk comes from the disk's company
    ///
    /// False for a missing disk; true for a disk without RAM.
    pub async fn is_company_exclusive(&self, disk_id: i32) -> bool {
        let result: Result<bool> = async {
            let rows = self
                .fetch(COMPANY_EXCLUSIVE, &[DatabaseValue::Int(disk_id)])
                .await?;
            rows.first().map_or(Ok(false), |row| row.boolean("exclusive"))
        }
        .await;
        settle("is_company_exclusive", result, false)
    }

    /// Whether some disk stores at least `num` photos with this description
    pub async fn is_disk_containing_at_least_num_exists(&self, description: &str, num: i32) -> bool {
        let result: Result<bool> = async {
            let rows = self
                .fetch(
                    DISK_WITH_AT_LEAST,
                    &[description.into(), DatabaseValue::Int(num)],
                )
                .await?;
            rows.first().map_or(Ok(false), |row| row.boolean("found"))
        }
        .await;
        settle("is_disk_containing_at_least_num_exists", result, false)
    }

    /// Five disks holding the most photo data, ties broken by lower id
    pub async fn get_disks_containing_the_most_data(&self) -> Vec<i32> {
        let result = self
            .fetch(DISKS_BY_STORED_DATA, &[])
            .await
            .and_then(|rows| id_column(&rows, "disk_id"));
        settle("get_disks_containing_the_most_data", result, Vec::new())
    }

    /// Disks sharing at least one photo with another disk, ascending
    pub async fn get_conflicting_disks(&self) -> Vec<i32> {
        let result = self
            .fetch(CONFLICTING_DISKS, &[])
            .await
            .and_then(|rows| id_column(&rows, "disk_id"));
        settle("get_conflicting_disks", result, Vec::new())
    }

    /// Five disks able to take the most photos, then fastest, then lowest id
    pub async fn most_available_disks(&self) -> Vec<i32> {
        let result = self
            .fetch(MOST_AVAILABLE_DISKS, &[])
            .await
            .and_then(|rows| id_column(&rows, "disk_id"));
        settle("most_available_disks", result, Vec::new())
    }

    /// Up to ten photos stored on at least half of the disks holding
    /// `photo_id`, lowest id first
    pub async fn get_close_photos(&self, photo_id: i32) -> Vec<i32> {
        let result = self
            .fetch(CLOSE_PHOTOS, &[DatabaseValue::Int(photo_id)])
            .await
            .and_then(|rows| id_column(&rows, "photo_id"));
        settle("get_close_photos", result, Vec::new())
    }
}
