use super::{expect_single_row, settle, PhotoStore};
use crate::business::{Disk, Photo};
use crate::core::{DatabaseValue, Result, ReturnValue, TransactionGuard};

const INSERT_DISK: &str = "INSERT INTO Disks (disk_id, company, speed, free_space, cost)
    VALUES ($1, $2, $3, $4, $5)";

const INSERT_PHOTO: &str =
    "INSERT INTO Photos (photo_id, description, size) VALUES ($1, $2, $3)";

const SELECT_DISK: &str =
    "SELECT disk_id, company, speed, free_space, cost FROM Disks WHERE disk_id = $1";

const DELETE_DISK: &str = "DELETE FROM Disks WHERE disk_id = $1";

impl PhotoStore {
    /// Insert a disk
    pub async fn add_disk(&self, disk: &Disk) -> ReturnValue {
        tracing::debug!(disk_id = disk.disk_id, "add_disk");
        let params = disk.params();
        let result = self.write(&[(INSERT_DISK, &params[..])]).await;
        ReturnValue::from_result("add_disk", result, ReturnValue::from_error)
    }

    /// Fetch a disk; `None` when it does not exist or the query fails
    pub async fn get_disk_by_id(&self, disk_id: i32) -> Option<Disk> {
        let result: Result<Option<Disk>> = async {
            let rows = self
                .fetch(SELECT_DISK, &[DatabaseValue::Int(disk_id)])
                .await?;
            rows.first().map(Disk::from_row).transpose()
        }
        .await;
        settle("get_disk_by_id", result, None)
    }

    /// Delete a disk; its placements and RAM installations cascade
    pub async fn delete_disk(&self, disk_id: i32) -> ReturnValue {
        tracing::debug!(disk_id, "delete_disk");
        let result: Result<ReturnValue> = async {
            let db = self.open().await?;
            let tx = TransactionGuard::begin(&db).await?;
            let affected = tx
                .execute_with_params(DELETE_DISK, &[DatabaseValue::Int(disk_id)])
                .await;
            expect_single_row(tx, affected).await
        }
        .await;
        ReturnValue::from_result("delete_disk", result, ReturnValue::from_error)
    }

    /// Insert a disk and a photo atomically; neither is kept if either fails
    pub async fn add_disk_and_photo(&self, disk: &Disk, photo: &Photo) -> ReturnValue {
        tracing::debug!(
            disk_id = disk.disk_id,
            photo_id = photo.photo_id,
            "add_disk_and_photo"
        );
        let disk_params = disk.params();
        let photo_params = photo.params();
        let result = self
            .write(&[
                (INSERT_DISK, &disk_params[..]),
                (INSERT_PHOTO, &photo_params[..]),
            ])
            .await;
        ReturnValue::from_result("add_disk_and_photo", result, ReturnValue::from_error)
    }
}
