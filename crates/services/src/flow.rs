use std::sync::Arc;

use storage::repository::SessionStore;
use survey_core::model::UserId;
use survey_core::{GateFailure, SurveyStep};

use crate::api_config::{ApiConfig, ApiEndpoint};
use crate::error::FlowError;

/// What a participant may use on an admitted step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Admission {
    pub config: Option<ApiConfig>,
    pub user_id: Option<UserId>,
}

impl Admission {
    /// # Errors
    ///
    /// Returns `GateFailure::MissingApiUrl` when no URL was set.
    pub fn require_config(&self) -> Result<&ApiConfig, GateFailure> {
        self.config.as_ref().ok_or(GateFailure::MissingApiUrl)
    }

    /// # Errors
    ///
    /// Returns `GateFailure::MissingUser` when nobody signed up in this session.
    pub fn require_user(&self) -> Result<&UserId, GateFailure> {
        self.user_id.as_ref().ok_or(GateFailure::MissingUser)
    }
}

/// Checks page preconditions against the shared endpoint and session.
#[derive(Clone)]
pub struct FlowGate {
    endpoint: ApiEndpoint,
    session: Arc<dyn SessionStore>,
}

impl FlowGate {
    #[must_use]
    pub fn new(endpoint: ApiEndpoint, session: Arc<dyn SessionStore>) -> Self {
        Self { endpoint, session }
    }

    #[must_use]
    pub fn endpoint(&self) -> &ApiEndpoint {
        &self.endpoint
    }

    /// Admit the participant to `step`, or report the first unmet precondition.
    ///
    /// The session is only read when the step needs a user.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::Gate` for unmet preconditions and
    /// `FlowError::Storage` if the session cannot be read.
    pub async fn admit(&self, step: SurveyStep) -> Result<Admission, FlowError> {
        let config = self.endpoint.config();
        if step.requires_api_url() && config.is_none() {
            return Err(GateFailure::MissingApiUrl.into());
        }
        let user_id = if step.requires_user() {
            self.session.get_user_id().await?
        } else {
            None
        };
        step.check(config.is_some(), user_id.is_some())?;
        Ok(Admission { config, user_id })
    }
}
