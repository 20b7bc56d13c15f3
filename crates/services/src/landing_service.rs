use std::sync::Arc;

use tracing::warn;

use survey_core::GateFailure;

use crate::api::SurveyApi;
use crate::api_config::ApiEndpoint;
use crate::error::{ApiError, ProbeError};

/// Owns the landing page actions: setting the API URL and probing it.
#[derive(Clone)]
pub struct LandingService {
    endpoint: ApiEndpoint,
    api: Arc<dyn SurveyApi>,
}

impl LandingService {
    #[must_use]
    pub fn new(endpoint: ApiEndpoint, api: Arc<dyn SurveyApi>) -> Self {
        Self { endpoint, api }
    }

    #[must_use]
    pub fn api_url(&self) -> String {
        self.endpoint.get_api_url()
    }

    pub fn set_api_url(&self, url: impl Into<String>) {
        self.endpoint.set_api_url(url);
    }

    /// GET the API root and pretty-print whatever JSON it returns.
    ///
    /// # Errors
    ///
    /// Returns `ProbeError::Gate` when no URL is set (no request is issued)
    /// and `ProbeError::Api` when the request fails.
    pub async fn probe(&self) -> Result<String, ProbeError> {
        let config = self.endpoint.config().ok_or(GateFailure::MissingApiUrl)?;
        let payload = self.api.probe(&config).await.inspect_err(|err| {
            warn!(url = config.base_url(), error = %err, "probe failed");
        })?;
        serde_json::to_string_pretty(&payload)
            .map_err(|err| ProbeError::Api(ApiError::Malformed(err.to_string())))
    }
}
