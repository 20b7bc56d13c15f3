use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use tracing::debug;

use survey_core::model::{Answer, Choice, Question, QuestionId, SignupRequest, StatMetric};

use super::SurveyApi;
use super::contracts::{
    ChoicesResponse, CountResponse, QuestionResponse, SignupReceipt, SignupResponse, decode,
    error_message,
};
use crate::api_config::ApiConfig;
use crate::error::ApiError;

/// `SurveyApi` over HTTP/JSON.
///
/// The client keeps a cookie store so session cookies set by the backend are
/// sent back on later requests.
#[derive(Clone)]
pub struct HttpSurveyApi {
    client: Client,
}

impl HttpSurveyApi {
    /// # Errors
    ///
    /// Returns `ApiError::Transport` if the HTTP client cannot be built.
    pub fn new() -> Result<Self, ApiError> {
        let client = Client::builder().cookie_store(true).build()?;
        Ok(Self { client })
    }

    async fn send(&self, request: RequestBuilder) -> Result<Vec<u8>, ApiError> {
        let response = request
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;
        let status = response.status();
        let body = response.bytes().await?;
        if !status.is_success() {
            return Err(ApiError::HttpStatus {
                status,
                message: error_message(&body),
            });
        }
        Ok(body.to_vec())
    }

    async fn get_body(&self, url: String) -> Result<Vec<u8>, ApiError> {
        debug!(%url, "GET");
        self.send(self.client.get(url)).await
    }
}

#[async_trait]
impl SurveyApi for HttpSurveyApi {
    async fn probe(&self, api: &ApiConfig) -> Result<Value, ApiError> {
        let body = self.get_body(api.base_url().to_string()).await?;
        decode(&body)
    }

    async fn fetch_question(&self, api: &ApiConfig, id: QuestionId) -> Result<Question, ApiError> {
        let body = self.get_body(api.endpoint(&format!("question/{id}"))).await?;
        let parsed: QuestionResponse = decode(&body)?;
        Ok(parsed.into_question(id))
    }

    async fn fetch_choices(
        &self,
        api: &ApiConfig,
        id: QuestionId,
    ) -> Result<Vec<Choice>, ApiError> {
        let body = self.get_body(api.endpoint(&format!("choice/{id}"))).await?;
        let parsed: ChoicesResponse = decode(&body)?;
        Ok(parsed.into_choices())
    }

    async fn question_count(&self, api: &ApiConfig) -> Result<u64, ApiError> {
        let body = self.get_body(api.endpoint("questions/count")).await?;
        let parsed: CountResponse = decode(&body)?;
        Ok(parsed.total)
    }

    async fn submit_answers(&self, api: &ApiConfig, answers: &[Answer]) -> Result<(), ApiError> {
        let url = api.endpoint("submit");
        debug!(%url, count = answers.len(), "POST");
        self.send(self.client.post(url).json(answers)).await?;
        Ok(())
    }

    async fn signup(
        &self,
        api: &ApiConfig,
        request: &SignupRequest,
    ) -> Result<SignupReceipt, ApiError> {
        let url = api.endpoint("signup");
        debug!(%url, "POST");
        let body = self.send(self.client.post(url).json(request)).await?;
        let parsed: SignupResponse = decode(&body)?;
        parsed.into_receipt()
    }

    async fn fetch_stat(&self, api: &ApiConfig, metric: StatMetric) -> Result<Value, ApiError> {
        let body = self
            .get_body(api.endpoint(&format!("stats/{}", metric.path_segment())))
            .await?;
        decode(&body)
    }
}
