use survey_core::model::{Answer, ChoiceId, UserId};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use crate::repository::StorageError;

pub(crate) const USER_ID_KEY: &str = "userId";

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn choice_id_to_i64(id: ChoiceId) -> Result<i64, StorageError> {
    i64::try_from(id.value()).map_err(|_| StorageError::Serialization("choice_id overflow".into()))
}

fn choice_id_from_i64(v: i64) -> Result<ChoiceId, StorageError> {
    u64::try_from(v)
        .map(ChoiceId::new)
        .map_err(|_| StorageError::Serialization("choice_id sign overflow".into()))
}

pub(crate) fn user_id_from_str(raw: &str) -> Result<UserId, StorageError> {
    UserId::new(raw).map_err(ser)
}

pub(crate) fn map_answer_row(row: &SqliteRow) -> Result<Answer, StorageError> {
    let user_id: String = row.try_get("user_id").map_err(ser)?;
    let choice_id: i64 = row.try_get("choice_id").map_err(ser)?;
    Ok(Answer::new(
        user_id_from_str(&user_id)?,
        choice_id_from_i64(choice_id)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choice_ids_convert_within_range() {
        assert_eq!(choice_id_to_i64(ChoiceId::new(7)).unwrap(), 7);
        assert!(choice_id_to_i64(ChoiceId::new(u64::MAX)).is_err());
        assert!(choice_id_from_i64(-1).is_err());
    }

    #[test]
    fn blank_user_id_is_a_serialization_error() {
        assert!(matches!(
            user_id_from_str(""),
            Err(StorageError::Serialization(_))
        ));
    }
}
