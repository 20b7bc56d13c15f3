use async_trait::async_trait;
use sqlx::Row;
use survey_core::model::{Answer, UserId};

use crate::repository::{SessionStore, StorageError};

use super::SqliteRepository;
use super::mapping::{USER_ID_KEY, choice_id_to_i64, map_answer_row, user_id_from_str};

#[async_trait]
impl SessionStore for SqliteRepository {
    async fn get_user_id(&self) -> Result<Option<UserId>, StorageError> {
        let row = sqlx::query("SELECT value FROM session_entries WHERE key = ?1")
            .bind(USER_ID_KEY)
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };
        let value: String = row
            .try_get("value")
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        user_id_from_str(&value).map(Some)
    }

    async fn set_user_id(&self, id: &UserId) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO session_entries (key, value) VALUES (?1, ?2)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value
            ",
        )
        .bind(USER_ID_KEY)
        .bind(id.as_str())
        .execute(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;
        Ok(())
    }

    async fn append_answer(&self, answer: &Answer) -> Result<(), StorageError> {
        sqlx::query("INSERT INTO session_answers (user_id, choice_id) VALUES (?1, ?2)")
            .bind(answer.user_id.as_str())
            .bind(choice_id_to_i64(answer.choice_id)?)
            .execute(&self.pool)
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;
        Ok(())
    }

    async fn replace_last_answer(&self, answer: &Answer) -> Result<(), StorageError> {
        let updated = sqlx::query(
            r"
            UPDATE session_answers SET user_id = ?1, choice_id = ?2
            WHERE position = (SELECT MAX(position) FROM session_answers)
            ",
        )
        .bind(answer.user_id.as_str())
        .bind(choice_id_to_i64(answer.choice_id)?)
        .execute(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        if updated.rows_affected() == 0 {
            self.append_answer(answer).await?;
        }
        Ok(())
    }

    async fn get_answers(&self) -> Result<Vec<Answer>, StorageError> {
        let rows =
            sqlx::query("SELECT user_id, choice_id FROM session_answers ORDER BY position ASC")
                .fetch_all(&self.pool)
                .await
                .map_err(|err| StorageError::Connection(err.to_string()))?;
        rows.iter().map(map_answer_row).collect()
    }

    async fn clear_answers(&self) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM session_answers")
            .execute(&self.pool)
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;
        Ok(())
    }
}
