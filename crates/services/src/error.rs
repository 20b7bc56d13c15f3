//! Shared error types for the services crate.

use reqwest::StatusCode;
use thiserror::Error;

use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;
use survey_core::GateFailure;
use survey_core::model::{SignupErrors, StatDecodeError};

/// Failures talking to the survey backend.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("request failed with status {status}")]
    HttpStatus {
        status: StatusCode,
        message: Option<String>,
    },
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl ApiError {
    /// Server supplied error text, when the failing response carried one.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::HttpStatus {
                message: Some(message),
                ..
            } => Some(message.as_str()),
            _ => None,
        }
    }
}

impl From<StatDecodeError> for ApiError {
    fn from(err: StatDecodeError) -> Self {
        ApiError::Malformed(err.to_string())
    }
}

/// Errors emitted while admitting a participant to a survey step.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FlowError {
    #[error(transparent)]
    Gate(#[from] GateFailure),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `QuestionNavigator`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum NavigatorError {
    #[error(transparent)]
    Gate(#[from] GateFailure),
    #[error("could not load the question: {0}")]
    Load(#[source] ApiError),
    #[error("could not submit the answers: {0}")]
    Submission(#[source] ApiError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<FlowError> for NavigatorError {
    fn from(err: FlowError) -> Self {
        match err {
            FlowError::Gate(gate) => NavigatorError::Gate(gate),
            FlowError::Storage(storage) => NavigatorError::Storage(storage),
        }
    }
}

/// A failed advance, together with whether the final answer of the survey is
/// now held in the session. A retry must replace that answer, not append it.
#[derive(Debug, Error)]
#[error("{source}")]
pub struct AdvanceError {
    #[source]
    pub source: NavigatorError,
    pub final_recorded: bool,
}

impl AdvanceError {
    #[must_use]
    pub fn new(source: impl Into<NavigatorError>, final_recorded: bool) -> Self {
        Self {
            source: source.into(),
            final_recorded,
        }
    }
}

/// Errors emitted by the landing page probe.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProbeError {
    #[error(transparent)]
    Gate(#[from] GateFailure),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors emitted by `SignupService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SignupError {
    #[error(transparent)]
    Invalid(#[from] SignupErrors),
    #[error(transparent)]
    Gate(#[from] GateFailure),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `StatsService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StatsError {
    #[error(transparent)]
    Gate(#[from] GateFailure),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("statistics task failed: {0}")]
    Task(String),
}

impl From<FlowError> for SignupError {
    fn from(err: FlowError) -> Self {
        match err {
            FlowError::Gate(gate) => SignupError::Gate(gate),
            FlowError::Storage(storage) => SignupError::Storage(storage),
        }
    }
}

impl From<FlowError> for StatsError {
    fn from(err: FlowError) -> Self {
        match err {
            FlowError::Gate(gate) => StatsError::Gate(gate),
            FlowError::Storage(storage) => StatsError::Storage(storage),
        }
    }
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Api(#[from] ApiError),
}
