//! Response contracts for each endpoint. Shape mismatches surface as
//! `ApiError::Malformed` instead of propagating half-filled values.

use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;

use survey_core::model::{Choice, ChoiceId, Question, QuestionId, UserId};

use crate::error::ApiError;

pub(crate) fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|err| ApiError::Malformed(err.to_string()))
}

/// Best-effort `{ "error": "..." }` extraction from a failing response.
pub(crate) fn error_message(body: &[u8]) -> Option<String> {
    #[derive(Deserialize)]
    struct ErrorBody {
        error: Option<Value>,
    }

    let parsed: ErrorBody = serde_json::from_slice(body).ok()?;
    match parsed.error? {
        Value::String(text) if !text.trim().is_empty() => Some(text),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct QuestionResponse {
    title: String,
    #[serde(default)]
    image: Option<String>,
}

impl QuestionResponse {
    pub(crate) fn into_question(self, id: QuestionId) -> Question {
        Question::new(id, self.title, self.image)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChoicesResponse {
    choices: Vec<ChoiceRow>,
}

#[derive(Debug, Deserialize)]
struct ChoiceRow {
    id: u64,
    content: String,
    sqe: f64,
    #[serde(deserialize_with = "flag")]
    is_active: bool,
}

impl ChoicesResponse {
    pub(crate) fn into_choices(self) -> Vec<Choice> {
        self.choices
            .into_iter()
            .map(|row| Choice::new(ChoiceId::new(row.id), row.content, row.sqe, row.is_active))
            .collect()
    }
}

/// SQL backends often hand booleans over as `0`/`1`.
fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Bool(value) => Ok(value),
        Value::Number(number) => Ok(number.as_f64().is_some_and(|n| n != 0.0)),
        other => Err(serde::de::Error::custom(format!(
            "expected boolean flag, got {other}"
        ))),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CountResponse {
    pub(crate) total: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SignupResponse {
    #[serde(default)]
    user_id: Option<Value>,
    #[serde(default)]
    user: Option<UserRef>,
    #[serde(default, alias = "massage")]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UserRef {
    id: Value,
}

/// What signup hands back: the identity to record plus an optional greeting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupReceipt {
    pub user_id: UserId,
    pub message: Option<String>,
}

impl SignupResponse {
    pub(crate) fn into_receipt(self) -> Result<SignupReceipt, ApiError> {
        let raw = self
            .user_id
            .or_else(|| self.user.map(|user| user.id))
            .ok_or_else(|| ApiError::Malformed("signup response has no user id".into()))?;
        let text = match raw {
            Value::String(text) => text,
            Value::Number(number) => number.to_string(),
            other => {
                return Err(ApiError::Malformed(format!(
                    "unexpected user id type: {other}"
                )));
            }
        };
        let user_id = UserId::new(text)
            .map_err(|_| ApiError::Malformed("signup response has a blank user id".into()))?;
        Ok(SignupReceipt {
            user_id,
            message: self.message.filter(|m| !m.trim().is_empty()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_without_image() {
        let parsed: QuestionResponse = decode(br#"{"title":"Favourite fruit?"}"#).unwrap();
        let question = parsed.into_question(QuestionId::new(2));
        assert_eq!(question.title(), "Favourite fruit?");
        assert_eq!(question.image_url(), None);
    }

    #[test]
    fn question_missing_title_is_malformed() {
        let err = decode::<QuestionResponse>(br#"{"image":"x.png"}"#).unwrap_err();
        assert!(matches!(err, ApiError::Malformed(_)));
    }

    #[test]
    fn choices_accept_numeric_flags() {
        let parsed: ChoicesResponse = decode(
            br#"{"choices":[
                {"id":1,"content":"A","sqe":2,"is_active":true},
                {"id":2,"content":"B","sqe":5,"is_active":0},
                {"id":3,"content":"C","sqe":2.5,"is_active":1}
            ]}"#,
        )
        .unwrap();
        let flags = parsed
            .into_choices()
            .iter()
            .map(Choice::is_active)
            .collect::<Vec<_>>();
        assert_eq!(flags, vec![true, false, true]);
    }

    #[test]
    fn choices_with_text_flag_are_malformed() {
        let err = decode::<ChoicesResponse>(
            br#"{"choices":[{"id":1,"content":"A","sqe":2,"is_active":"yes"}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ApiError::Malformed(_)));
    }

    #[test]
    fn count_requires_total() {
        assert_eq!(decode::<CountResponse>(br#"{"total":5}"#).unwrap().total, 5);
        assert!(decode::<CountResponse>(br#"{"count":5}"#).is_err());
    }

    #[test]
    fn signup_reads_either_id_shape() {
        let flat: SignupResponse = decode(br#"{"user_id":12,"message":"Welcome"}"#).unwrap();
        let receipt = flat.into_receipt().unwrap();
        assert_eq!(receipt.user_id.as_str(), "12");
        assert_eq!(receipt.message.as_deref(), Some("Welcome"));

        let nested: SignupResponse = decode(br#"{"user":{"id":"abc"},"massage":"Hi"}"#).unwrap();
        let receipt = nested.into_receipt().unwrap();
        assert_eq!(receipt.user_id.as_str(), "abc");
        assert_eq!(receipt.message.as_deref(), Some("Hi"));
    }

    #[test]
    fn signup_without_id_is_malformed() {
        let parsed: SignupResponse = decode(br#"{"message":"ok"}"#).unwrap();
        assert!(matches!(parsed.into_receipt(), Err(ApiError::Malformed(_))));
    }

    #[test]
    fn error_message_is_optional() {
        assert_eq!(
            error_message(br#"{"error":"duplicate email"}"#).as_deref(),
            Some("duplicate email")
        );
        assert_eq!(error_message(b"<html>500</html>"), None);
        assert_eq!(error_message(br#"{"detail":"x"}"#), None);
    }
}
