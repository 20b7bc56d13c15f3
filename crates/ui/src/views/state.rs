use dioxus::prelude::*;

use services::{
    AdvanceError, ApiError, FlowError, NavigatorError, ProbeError, SignupError, StatsError,
};
use survey_core::GateFailure;

/// What a view shows when an operation fails.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewError {
    /// A page precondition failed; the participant goes back to the main page.
    Blocked(GateFailure),
    Failed {
        action: &'static str,
        detail: Option<String>,
    },
}

impl ViewError {
    fn failed(action: &'static str, err: Option<&ApiError>) -> Self {
        ViewError::Failed {
            action,
            detail: err.and_then(ApiError::server_message).map(str::to_string),
        }
    }

    #[must_use]
    pub fn message(&self) -> String {
        match self {
            ViewError::Blocked(gate) => gate.to_string(),
            ViewError::Failed {
                action,
                detail: Some(detail),
            } => format!("Could not {action}: {detail}"),
            ViewError::Failed {
                action,
                detail: None,
            } => format!("Could not {action}. Please try again."),
        }
    }

    #[must_use]
    pub fn is_blocked(&self) -> bool {
        matches!(self, ViewError::Blocked(_))
    }
}

impl From<FlowError> for ViewError {
    fn from(err: FlowError) -> Self {
        match err {
            FlowError::Gate(gate) => ViewError::Blocked(gate),
            _ => ViewError::failed("read the session", None),
        }
    }
}

impl From<NavigatorError> for ViewError {
    fn from(err: NavigatorError) -> Self {
        match err {
            NavigatorError::Gate(gate) => ViewError::Blocked(gate),
            NavigatorError::Load(api) => ViewError::failed("load the question", Some(&api)),
            NavigatorError::Submission(api) => ViewError::failed("submit your answers", Some(&api)),
            _ => ViewError::failed("save your answer", None),
        }
    }
}

impl From<AdvanceError> for ViewError {
    fn from(err: AdvanceError) -> Self {
        ViewError::from(err.source)
    }
}

impl From<SignupError> for ViewError {
    fn from(err: SignupError) -> Self {
        match err {
            SignupError::Gate(gate) => ViewError::Blocked(gate),
            SignupError::Api(api) => ViewError::failed("sign you up", Some(&api)),
            _ => ViewError::failed("sign you up", None),
        }
    }
}

impl From<StatsError> for ViewError {
    fn from(err: StatsError) -> Self {
        match err {
            StatsError::Gate(gate) => ViewError::Blocked(gate),
            StatsError::Api(api) => ViewError::failed("load the statistics", Some(&api)),
            _ => ViewError::failed("load the statistics", None),
        }
    }
}

impl From<ProbeError> for ViewError {
    fn from(err: ProbeError) -> Self {
        match err {
            ProbeError::Gate(gate) => ViewError::Blocked(gate),
            ProbeError::Api(api) => ViewError::failed("fetch data", Some(&api)),
            _ => ViewError::failed("fetch data", None),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: &Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(err.clone()),
            None => ViewState::Idle,
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use services::StatusCode;

    #[test]
    fn server_detail_is_part_of_the_message() {
        let err = ViewError::from(NavigatorError::Submission(ApiError::HttpStatus {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: Some("duplicate answer".to_string()),
        }));
        assert_eq!(err.message(), "Could not submit your answers: duplicate answer");
        assert!(!err.is_blocked());
    }

    #[test]
    fn advance_errors_report_their_cause() {
        let err = ViewError::from(AdvanceError::new(
            NavigatorError::Submission(ApiError::Malformed("x".into())),
            true,
        ));
        assert_eq!(err.message(), "Could not submit your answers. Please try again.");
    }

    #[test]
    fn gate_failures_block() {
        let err = ViewError::from(StatsError::Gate(GateFailure::MissingApiUrl));
        assert!(err.is_blocked());
        assert_eq!(err.message(), GateFailure::MissingApiUrl.to_string());
    }

    #[test]
    fn malformed_payload_has_generic_message() {
        let err = ViewError::from(NavigatorError::Load(ApiError::Malformed("x".into())));
        assert_eq!(
            err.message(),
            "Could not load the question. Please try again."
        );
    }
}
