#![forbid(unsafe_code)]

pub mod api;
pub mod api_config;
pub mod app_services;
pub mod error;
pub mod flow;
pub mod landing_service;
pub mod navigator;
pub mod signup_service;
pub mod stats_service;

pub use api::{HttpSurveyApi, SignupReceipt, SurveyApi};
pub use api_config::{ApiConfig, ApiEndpoint};
pub use app_services::AppServices;
pub use error::{
    AdvanceError, ApiError, AppServicesError, FlowError, NavigatorError, ProbeError, SignupError, StatsError,
};
pub use flow::{Admission, FlowGate};
pub use landing_service::LandingService;
pub use navigator::{AdvanceOutcome, QuestionEntry, QuestionNavigator};
pub use reqwest::StatusCode;
pub use signup_service::SignupService;
pub use stats_service::{StatPanel, StatsService};
