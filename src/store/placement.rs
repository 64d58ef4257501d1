//! Photo placement on disks and RAM installation in disks

use super::{expect_single_row, PhotoStore};
use crate::business::Photo;
use crate::core::{DatabaseValue, Result, ReturnValue, TransactionGuard};

const INSERT_PLACEMENT: &str = "INSERT INTO StoredOn (photo_id, disk_id) VALUES ($1, $2)";

// Sizes come from Photos, not from the caller's copy of the photo.
const CONSUME_SPACE: &str = "UPDATE Disks
    SET free_space = free_space - (SELECT size FROM Photos WHERE photo_id = $1)
    WHERE disk_id = $2";

const DELETE_PLACEMENT: &str = "DELETE FROM StoredOn WHERE photo_id = $1 AND disk_id = $2";

const RELEASE_SPACE: &str = "UPDATE Disks
    SET free_space = free_space + (SELECT size FROM Photos WHERE photo_id = $1)
    WHERE disk_id = $2";

const INSERT_INSTALLATION: &str = "INSERT INTO PartOf (ram_id, disk_id) VALUES ($1, $2)";

const DELETE_INSTALLATION: &str = "DELETE FROM PartOf WHERE ram_id = $1 AND disk_id = $2";

impl PhotoStore {
    /// Store a photo on a disk, consuming the photo's size of free space
    ///
    /// - `NotExists` when the photo or the disk is missing
    /// - `AlreadyExists` when the photo is already on that disk
    /// - `BadParams` when the disk lacks the free space
    pub async fn add_photo_to_disk(&self, photo: &Photo, disk_id: i32) -> ReturnValue {
        tracing::debug!(photo_id = photo.photo_id, disk_id, "add_photo_to_disk");
        let params = [DatabaseValue::Int(photo.photo_id), DatabaseValue::Int(disk_id)];
        let result = self
            .write(&[(INSERT_PLACEMENT, &params[..]), (CONSUME_SPACE, &params[..])])
            .await;
        ReturnValue::from_result(
            "add_photo_to_disk",
            result,
            ReturnValue::from_reference_error,
        )
    }

    /// Take a photo off a disk, returning its size to the disk's free space
    ///
    /// Reports `Ok` when the photo was not on the disk to begin with.
    pub async fn remove_photo_from_disk(&self, photo: &Photo, disk_id: i32) -> ReturnValue {
        tracing::debug!(photo_id = photo.photo_id, disk_id, "remove_photo_from_disk");
        let result = self.try_remove_photo_from_disk(photo.photo_id, disk_id).await;
        ReturnValue::from_result("remove_photo_from_disk", result, ReturnValue::from_error)
    }

    async fn try_remove_photo_from_disk(&self, photo_id: i32, disk_id: i32) -> Result<ReturnValue> {
        let db = self.open().await?;
        let tx = TransactionGuard::begin(&db).await?;
        let params = [DatabaseValue::Int(photo_id), DatabaseValue::Int(disk_id)];
        let result: Result<()> = async {
            let removed = tx.execute_with_params(DELETE_PLACEMENT, &params).await?;
            if removed == 1 {
                tx.execute_with_params(RELEASE_SPACE, &params).await?;
            }
            Ok(())
        }
        .await;
        tx.finish(result).await?;
        Ok(ReturnValue::Ok)
    }

    /// Install a RAM module in a disk
    ///
    /// `NotExists` when either side is missing, `AlreadyExists` when the
    /// module is already part of that disk.
    pub async fn add_ram_to_disk(&self, ram_id: i32, disk_id: i32) -> ReturnValue {
        tracing::debug!(ram_id, disk_id, "add_ram_to_disk");
        let params = [DatabaseValue::Int(ram_id), DatabaseValue::Int(disk_id)];
        let result = self.write(&[(INSERT_INSTALLATION, &params[..])]).await;
        ReturnValue::from_result("add_ram_to_disk", result, ReturnValue::from_reference_error)
    }

    /// Remove a RAM module from a disk; `NotExists` when it was not installed
    pub async fn remove_ram_from_disk(&self, ram_id: i32, disk_id: i32) -> ReturnValue {
        tracing::debug!(ram_id, disk_id, "remove_ram_from_disk");
        let result: Result<ReturnValue> = async {
            let db = self.open().await?;
            let tx = TransactionGuard::begin(&db).await?;
            let affected = tx
                .execute_with_params(
                    DELETE_INSTALLATION,
                    &[DatabaseValue::Int(ram_id), DatabaseValue::Int(disk_id)],
                )
                .await;
            expect_single_row(tx, affected).await
        }
        .await;
        ReturnValue::from_result("remove_ram_from_disk", result, ReturnValue::from_error)
    }
}
