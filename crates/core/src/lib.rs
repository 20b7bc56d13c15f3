#![forbid(unsafe_code)]

pub mod flow;
pub mod model;
pub mod navigator;

pub use flow::{GateFailure, SurveyStep};
pub use navigator::{
    AdvanceStep, LoadToken, NavigatorPhase, NavigatorState, NavigatorStateError, QuestionPage,
};
