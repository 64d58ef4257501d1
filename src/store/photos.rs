use super::{expect_single_row, settle, PhotoStore};
use crate::business::Photo;
use crate::core::{DatabaseValue, Result, ReturnValue, TransactionGuard};

const INSERT_PHOTO: &str =
    "INSERT INTO Photos (photo_id, description, size) VALUES ($1, $2, $3)";

const SELECT_PHOTO: &str =
    "SELECT photo_id, description, size FROM Photos WHERE photo_id = $1";

// Return the photo's size to every disk holding it before the row (and its
// placements, by cascade) disappears.
const RELEASE_PHOTO_SPACE: &str = "UPDATE Disks d
    SET free_space = d.free_space + p.size
    FROM StoredOn s
    INNER JOIN Photos p ON p.photo_id = s.photo_id
    WHERE s.photo_id = $1 AND s.disk_id = d.disk_id";

const DELETE_PHOTO: &str = "DELETE FROM Photos WHERE photo_id = $1";

impl PhotoStore {
    /// Insert a photo
    ///
    /// `AlreadyExists` for a taken id, `BadParams` for a non-positive id or a
    /// negative size.
    pub async fn add_photo(&self, photo: &Photo) -> ReturnValue {
        tracing::debug!(photo_id = photo.photo_id, "add_photo");
        let params = photo.params();
        let result = self.write(&[(INSERT_PHOTO, &params[..])]).await;
        ReturnValue::from_result("add_photo", result, ReturnValue::from_error)
    }

    /// Fetch a photo; `None` when it does not exist or the query fails
    pub async fn get_photo_by_id(&self, photo_id: i32) -> Option<Photo> {
        let result: Result<Option<Photo>> = async {
            let rows = self
                .fetch(SELECT_PHOTO, &[DatabaseValue::Int(photo_id)])
                .await?;
            rows.first().map(Photo::from_row).transpose()
        }
        .await;
        settle("get_photo_by_id", result, None)
    }

    /// Delete a photo, freeing its space on every disk it was stored on
    pub async fn delete_photo(&self, photo_id: i32) -> ReturnValue {
        tracing::debug!(photo_id, "delete_photo");
        let result = self.try_delete_photo(photo_id).await;
        ReturnValue::from_result("delete_photo", result, ReturnValue::from_error)
    }

    async fn try_delete_photo(&self, photo_id: i32) -> Result<ReturnValue> {
        let db = self.open().await?;
        let tx = TransactionGuard::begin(&db).await?;
        let params = [DatabaseValue::Int(photo_id)];
        let affected: Result<u64> = async {
            tx.execute_with_params(RELEASE_PHOTO_SPACE, &params).await?;
            tx.execute_with_params(DELETE_PHOTO, &params).await
        }
        .await;
        expect_single_row(tx, affected).await
    }
}
