use thiserror::Error;

use crate::model::QuestionId;

/// The linear sequence of survey pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurveyStep {
    Landing,
    Intro,
    Signup,
    Question(QuestionId),
    Result,
}

/// A step precondition that failed. Never recovered by guessing a default; the
/// caller sends the participant back to the landing page.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum GateFailure {
    #[error("The API URL is not set. Enter it on the main page first.")]
    MissingApiUrl,
    #[error("Please sign up before answering the survey.")]
    MissingUser,
}

impl SurveyStep {
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            SurveyStep::Landing => "/".to_string(),
            SurveyStep::Intro => "/survey".to_string(),
            SurveyStep::Signup => "/signup".to_string(),
            SurveyStep::Question(id) => format!("/question/{id}"),
            SurveyStep::Result => "/result".to_string(),
        }
    }

    #[must_use]
    pub fn requires_api_url(&self) -> bool {
        !matches!(self, SurveyStep::Landing)
    }

    #[must_use]
    pub fn requires_user(&self) -> bool {
        matches!(self, SurveyStep::Question(_))
    }

    /// Check the step's preconditions. The API URL is checked first.
    ///
    /// # Errors
    ///
    /// Returns the first `GateFailure` that applies.
    pub fn check(&self, api_url_set: bool, user_present: bool) -> Result<(), GateFailure> {
        if self.requires_api_url() && !api_url_set {
            return Err(GateFailure::MissingApiUrl);
        }
        if self.requires_user() && !user_present {
            return Err(GateFailure::MissingUser);
        }
        Ok(())
    }
}
