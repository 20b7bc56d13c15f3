//! Backend contract: one method per endpoint, typed at the boundary.

mod contracts;
mod http;

use async_trait::async_trait;
use serde_json::Value;

use survey_core::model::{Answer, Choice, Question, QuestionId, SignupRequest, StatMetric};

use crate::api_config::ApiConfig;
use crate::error::ApiError;

pub use contracts::SignupReceipt;
pub use http::HttpSurveyApi;

#[async_trait]
pub trait SurveyApi: Send + Sync {
    /// GET `{apiUrl}`; returns whatever JSON the root serves.
    async fn probe(&self, api: &ApiConfig) -> Result<Value, ApiError>;

    /// GET `{apiUrl}/question/{id}`.
    async fn fetch_question(&self, api: &ApiConfig, id: QuestionId) -> Result<Question, ApiError>;

    /// GET `{apiUrl}/choice/{id}`; raw list, inactive entries included.
    async fn fetch_choices(&self, api: &ApiConfig, id: QuestionId)
    -> Result<Vec<Choice>, ApiError>;

    /// GET `{apiUrl}/questions/count`.
    async fn question_count(&self, api: &ApiConfig) -> Result<u64, ApiError>;

    /// POST `{apiUrl}/submit` with the whole answer sequence.
    async fn submit_answers(&self, api: &ApiConfig, answers: &[Answer]) -> Result<(), ApiError>;

    /// POST `{apiUrl}/signup`.
    async fn signup(
        &self,
        api: &ApiConfig,
        request: &SignupRequest,
    ) -> Result<SignupReceipt, ApiError>;

    /// GET `{apiUrl}/stats/{metric}`; payload shape is metric specific.
    async fn fetch_stat(&self, api: &ApiConfig, metric: StatMetric) -> Result<Value, ApiError>;
}
