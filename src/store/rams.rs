use super::{expect_single_row, settle, PhotoStore};
use crate::business::Ram;
use crate::core::{DatabaseValue, Result, ReturnValue, TransactionGuard};

const INSERT_RAM: &str = "INSERT INTO RAMs (ram_id, company, size) VALUES ($1, $2, $3)";

const SELECT_RAM: &str = "SELECT ram_id, company, size FROM RAMs WHERE ram_id = $1";

const DELETE_RAM: &str = "DELETE FROM RAMs WHERE ram_id = $1";

impl PhotoStore {
    /// Insert a RAM module
    pub async fn add_ram(&self, ram: &Ram) -> ReturnValue {
        tracing::debug!(ram_id = ram.ram_id, "add_ram");
        let params = ram.params();
        let result = self.write(&[(INSERT_RAM, &params[..])]).await;
        ReturnValue::from_result("add_ram", result, ReturnValue::from_error)
    }

    /// Fetch a RAM module; `None` when it does not exist or the query fails
    pub async fn get_ram_by_id(&self, ram_id: i32) -> Option<Ram> {
        let result: Result<Option<Ram>> = async {
            let rows = self.fetch(SELECT_RAM, &[DatabaseValue::Int(ram_id)]).await?;
            rows.first().map(Ram::from_row).transpose()
        }
        .await;
        settle("get_ram_by_id", result, None)
    }

    /// Delete a RAM module; its installations cascade
    pub async fn delete_ram(&self, ram_id: i32) -> ReturnValue {
        tracing::debug!(ram_id, "delete_ram");
        let result: Result<ReturnValue> = async {
            let db = self.open().await?;
            let tx = TransactionGuard::begin(&db).await?;
            let affected = tx
                .execute_with_params(DELETE_RAM, &[DatabaseValue::Int(ram_id)])
                .await;
            expect_single_row(tx, affected).await
        }
        .await;
        ReturnValue::from_result("delete_ram", result, ReturnValue::from_error)
    }
}
