use std::sync::Arc;

use tracing::{info, warn};

use storage::repository::SessionStore;
use survey_core::model::{Answer, QuestionId, UserId};
use survey_core::{AdvanceStep, QuestionPage, SurveyStep};

use crate::api::SurveyApi;
use crate::api_config::ApiConfig;
use crate::error::{AdvanceError, NavigatorError};
use crate::flow::FlowGate;

/// Inputs a question page holds on to once admitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionEntry {
    pub config: ApiConfig,
    pub user_id: UserId,
}

/// Where the page goes after a successful advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    Navigate(QuestionId),
    Submitted { answers: usize },
}

/// Fetches question pages and records answers for the question loop.
#[derive(Clone)]
pub struct QuestionNavigator {
    gate: FlowGate,
    api: Arc<dyn SurveyApi>,
    session: Arc<dyn SessionStore>,
}

impl QuestionNavigator {
    #[must_use]
    pub fn new(gate: FlowGate, api: Arc<dyn SurveyApi>, session: Arc<dyn SessionStore>) -> Self {
        Self { gate, api, session }
    }

    /// Check the page preconditions. No request is issued when they fail.
    ///
    /// # Errors
    ///
    /// Returns `NavigatorError::Gate` when the API URL or the user is missing.
    pub async fn enter(&self, id: QuestionId) -> Result<QuestionEntry, NavigatorError> {
        let admission = self.gate.admit(SurveyStep::Question(id)).await?;
        Ok(QuestionEntry {
            config: admission.require_config()?.clone(),
            user_id: admission.require_user()?.clone(),
        })
    }

    /// Fetch question, choices and question count together. Any failure fails
    /// the whole load.
    ///
    /// # Errors
    ///
    /// Returns `NavigatorError::Load` if any of the three requests fails.
    pub async fn load(
        &self,
        entry: &QuestionEntry,
        id: QuestionId,
    ) -> Result<QuestionPage, NavigatorError> {
        let config = &entry.config;
        let joined = tokio::try_join!(
            self.api.fetch_question(config, id),
            self.api.fetch_choices(config, id),
            self.api.question_count(config),
        );
        match joined {
            Ok((question, choices, total)) => Ok(QuestionPage::new(question, choices, total)),
            Err(err) => {
                warn!(question = %id, error = %err, "question load failed");
                Err(NavigatorError::Load(err))
            }
        }
    }

    /// Record the selection and either move on or submit everything.
    ///
    /// The final answer is written before sending, so it survives a failed
    /// submission. A retry (`final_recorded`) overwrites that stored answer
    /// with the current selection, keeping one answer per visited question.
    ///
    /// # Errors
    ///
    /// Returns `AdvanceError` wrapping `NavigatorError::Storage` if the session
    /// cannot be updated and `NavigatorError::Submission` if the backend
    /// rejects the answers. `AdvanceError::final_recorded` reports whether the
    /// final answer is stored at the point of failure.
    pub async fn advance(
        &self,
        entry: &QuestionEntry,
        step: AdvanceStep,
    ) -> Result<AdvanceOutcome, AdvanceError> {
        let answer = Answer::new(entry.user_id.clone(), step.choice());
        match step {
            AdvanceStep::Next { next, .. } => {
                self.session
                    .append_answer(&answer)
                    .await
                    .map_err(|err| AdvanceError::new(err, false))?;
                Ok(AdvanceOutcome::Navigate(next))
            }
            AdvanceStep::Submit { final_recorded, .. } => {
                let written = if final_recorded {
                    self.session.replace_last_answer(&answer).await
                } else {
                    self.session.append_answer(&answer).await
                };
                written.map_err(|err| AdvanceError::new(err, final_recorded))?;

                let answers = self
                    .session
                    .get_answers()
                    .await
                    .map_err(|err| AdvanceError::new(err, true))?;

                if let Err(err) = self.api.submit_answers(&entry.config, &answers).await {
                    warn!(count = answers.len(), error = %err, "answer submission failed");
                    return Err(AdvanceError::new(NavigatorError::Submission(err), true));
                }

                self.session
                    .clear_answers()
                    .await
                    .map_err(|err| AdvanceError::new(err, true))?;
                info!(count = answers.len(), "answers submitted");
                Ok(AdvanceOutcome::Submitted {
                    answers: answers.len(),
                })
            }
        }
    }
}
