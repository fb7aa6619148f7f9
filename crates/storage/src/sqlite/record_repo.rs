use async_trait::async_trait;
use serde_json::Value;
use sqlx::Row;

use crate::repository::{ProgressRecordRepository, RecordMap, StorageError};

use super::SqliteRepository;

#[async_trait]
impl ProgressRecordRepository for SqliteRepository {
    async fn load_record(&self) -> Result<Option<RecordMap>, StorageError> {
        let row = sqlx::query("SELECT body FROM progress_record WHERE id = 1")
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let body: String = row
            .try_get("body")
            .map_err(|err| StorageError::Serialization(err.to_string()))?;

        match serde_json::from_str::<Value>(&body) {
            Ok(Value::Object(map)) => Ok(Some(map)),
            Ok(other) => Err(StorageError::Serialization(format!(
                "progress record is not an object: {other}"
            ))),
            Err(err) => Err(StorageError::Serialization(err.to_string())),
        }
    }

    async fn save_record(&self, record: &RecordMap) -> Result<(), StorageError> {
        let body = serde_json::to_string(record)
            .map_err(|err| StorageError::Serialization(err.to_string()))?;

        sqlx::query(
            r"
            INSERT INTO progress_record (id, body)
            VALUES (?1, ?2)
            ON CONFLICT(id) DO UPDATE SET
                body = excluded.body
            ",
        )
        .bind(1_i64)
        .bind(body)
        .execute(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        Ok(())
    }
}
