use std::sync::Arc;

use tracing::{info, warn};

use storage::repository::SessionStore;
use survey_core::SurveyStep;
use survey_core::model::SignupForm;

use crate::api::{SignupReceipt, SurveyApi};
use crate::error::SignupError;
use crate::flow::FlowGate;

/// Registers the participant and records the returned identity in the session.
#[derive(Clone)]
pub struct SignupService {
    gate: FlowGate,
    api: Arc<dyn SurveyApi>,
    session: Arc<dyn SessionStore>,
}

impl SignupService {
    #[must_use]
    pub fn new(gate: FlowGate, api: Arc<dyn SurveyApi>, session: Arc<dyn SessionStore>) -> Self {
        Self { gate, api, session }
    }

    /// Validate the form, send it, and store the new user id.
    ///
    /// Validation runs first; an invalid form never reaches the network.
    ///
    /// # Errors
    ///
    /// Returns `SignupError::Invalid` for field errors, `SignupError::Gate`
    /// without an API URL, `SignupError::Api` for request failures and
    /// `SignupError::Storage` if the identity cannot be recorded.
    pub async fn register(&self, form: &SignupForm) -> Result<SignupReceipt, SignupError> {
        let request = form.validate()?;
        let admission = self.gate.admit(SurveyStep::Signup).await?;
        let config = admission.require_config()?;

        let receipt = match self.api.signup(config, &request).await {
            Ok(receipt) => receipt,
            Err(err) => {
                warn!(error = %err, "signup failed");
                return Err(err.into());
            }
        };

        self.session.set_user_id(&receipt.user_id).await?;
        info!(user = %receipt.user_id, "participant registered");
        Ok(receipt)
    }
}
