//! Transaction guard for scoped commit/rollback
//!
//! Every mutating store operation runs its statements through a
//! [`TransactionGuard`] and hands the outcome to [`TransactionGuard::finish`],
//! which commits on success and rolls back on failure.

use super::database::Database;
use super::error::Result;
use super::value::DatabaseValue;

/// Transaction guard borrowing a connected database
///
/// `commit`, `rollback` and `finish` consume the guard, so a finished
/// transaction cannot be reused.
///
/// # Example
///
/// ```ignore
/// let tx = TransactionGuard::begin(&db).await?;
/// let result = async {
///     tx.execute_with_params("DELETE FROM StoredOn WHERE photo_id = $1", &[1.into()]).await?;
///     tx.execute_with_params("DELETE FROM Photos WHERE photo_id = $1", &[1.into()]).await
/// }
/// .await;
/// tx.finish(result).await?;
/// ```
pub struct TransactionGuard<'a, D: Database> {
    db: &'a D,
    finished: bool,
}

impl<'a, D: Database> TransactionGuard<'a, D> {
    /// Begin a new transaction
    ///
    /// # Errors
    ///
    /// Returns an error if the database is not connected or a transaction is
    /// already active.
    pub async fn begin(db: &'a D) -> Result<Self> {
        db.begin_transaction().await?;
        Ok(Self {
            db,
            finished: false,
        })
    }

    /// Execute a parameterized statement within the transaction
    pub async fn execute_with_params(&self, query: &str, params: &[DatabaseValue]) -> Result<u64> {
        self.db.execute_with_params(query, params).await
    }

    /// Execute a statement script within the transaction
    pub async fn batch_execute(&self, script: &str) -> Result<()> {
        self.db.batch_execute(script).await
    }

    /// Commit the transaction
    pub async fn commit(mut self) -> Result<()> {
        self.db.commit().await?;
        self.finished = true;
        Ok(())
    }

    /// Explicitly rollback the transaction
    pub async fn rollback(mut self) -> Result<()> {
        self.db.rollback().await?;
        self.finished = true;
        Ok(())
    }

    /// Commit if `result` is `Ok`, otherwise roll back and return the error
    ///
    /// A failed rollback is logged and the original error is kept.
    pub async fn finish<T>(self, result: Result<T>) -> Result<T> {
        match result {
            Ok(value) => {
                self.commit().await?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = self.rollback().await {
                    tracing::warn!(error = %rollback_err, "rollback failed");
                }
                Err(err)
            }
        }
    }
}

impl<D: Database> Drop for TransactionGuard<'_, D> {
    fn drop(&mut self) {
        // The server aborts an open transaction when its connection closes.
        if !self.finished {
            tracing::warn!(
                "TransactionGuard dropped without commit or rollback; \
                 transaction ends when the connection closes"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::DatabaseError;
    use crate::core::value::DatabaseResult;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    /// Records statements instead of running them
    #[derive(Default)]
    struct RecordingDatabase {
        log: Mutex<Vec<String>>,
        in_tx: AtomicBool,
    }

    impl RecordingDatabase {
        fn record(&self, entry: &str) {
            self.log.lock().unwrap().push(entry.to_string());
        }

        fn entries(&self) -> Vec<String> {
            self.log.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Database for RecordingDatabase {
        async fn connect(&self, _connection_string: &str) -> Result<()> {
            Ok(())
        }

        fn is_connected(&self) -> bool {
            true
        }

        async fn disconnect(&self) -> Result<()> {
            Ok(())
        }

        async fn execute(&self, query: &str) -> Result<u64> {
            self.record(query);
            Ok(1)
        }

        async fn batch_execute(&self, script: &str) -> Result<()> {
            self.record(script);
            Ok(())
        }

        async fn query(&self, query: &str) -> Result<DatabaseResult> {
            self.record(query);
            Ok(Vec::new())
        }

        async fn query_with_params(
            &self,
            query: &str,
            _params: &[DatabaseValue],
        ) -> Result<DatabaseResult> {
            self.record(query);
            Ok(Vec::new())
        }

        async fn execute_with_params(&self, query: &str, _params: &[DatabaseValue]) -> Result<u64> {
            self.record(query);
            Ok(1)
        }

        async fn begin_transaction(&self) -> Result<()> {
            self.in_tx.store(true, Ordering::Release);
            self.record("BEGIN");
            Ok(())
        }

        async fn commit(&self) -> Result<()> {
            self.in_tx.store(false, Ordering::Release);
            self.record("COMMIT");
            Ok(())
        }

        async fn rollback(&self) -> Result<()> {
            self.in_tx.store(false, Ordering::Release);
            self.record("ROLLBACK");
            Ok(())
        }

        fn in_transaction(&self) -> bool {
            self.in_tx.load(Ordering::Acquire)
        }
    }

    #[tokio::test]
    async fn test_finish_commits_on_success() {
        let db = RecordingDatabase::default();
        let tx = TransactionGuard::begin(&db).await.unwrap();
        let result = tx
            .execute_with_params("INSERT INTO Photos VALUES ($1, $2, $3)", &[])
            .await;
        assert_eq!(tx.finish(result).await.unwrap(), 1);

        assert_eq!(
            db.entries(),
            vec!["BEGIN", "INSERT INTO Photos VALUES ($1, $2, $3)", "COMMIT"]
        );
        assert!(!db.in_transaction());
    }

    #[tokio::test]
    async fn test_finish_rolls_back_on_error() {
        let db = RecordingDatabase::default();
        let tx = TransactionGuard::begin(&db).await.unwrap();
        let result: Result<u64> = Err(DatabaseError::query("boom"));
        assert!(tx.finish(result).await.is_err());

        assert_eq!(db.entries(), vec!["BEGIN", "ROLLBACK"]);
    }

    #[tokio::test]
    async fn test_explicit_rollback() {
        let db = RecordingDatabase::default();
        let tx = TransactionGuard::begin(&db).await.unwrap();
        assert!(db.in_transaction());
        tx.rollback().await.unwrap();

        assert_eq!(db.entries(), vec!["BEGIN", "ROLLBACK"]);
        assert!(!db.in_transaction());
    }

    #[tokio::test]
    async fn test_statements_run_inside_the_transaction() {
        let db = RecordingDatabase::default();
        let tx = TransactionGuard::begin(&db).await.unwrap();
        tx.batch_execute("CREATE TABLE Photos (photo_id INTEGER)").await.unwrap();
        assert!(db.in_transaction());
        tx.commit().await.unwrap();

        assert_eq!(
            db.entries(),
            vec!["BEGIN", "CREATE TABLE Photos (photo_id INTEGER)", "COMMIT"]
        );
        assert!(!db.in_transaction());
    }
}
