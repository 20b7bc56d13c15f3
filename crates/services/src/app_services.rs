use std::sync::Arc;

use storage::repository::{SessionStore, Storage};

use crate::api::{HttpSurveyApi, SurveyApi};
use crate::api_config::ApiEndpoint;
use crate::error::AppServicesError;
use crate::flow::FlowGate;
use crate::landing_service::LandingService;
use crate::navigator::QuestionNavigator;
use crate::signup_service::SignupService;
use crate::stats_service::StatsService;

/// Assembles app-facing services around one endpoint handle and one session.
#[derive(Clone)]
pub struct AppServices {
    endpoint: ApiEndpoint,
    session: Arc<dyn SessionStore>,
    gate: FlowGate,
    landing: Arc<LandingService>,
    navigator: Arc<QuestionNavigator>,
    signup: Arc<SignupService>,
    stats: Arc<StatsService>,
}

impl AppServices {
    /// Build services backed by `SQLite` session storage and the HTTP API.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization or HTTP client setup fails.
    pub async fn new_sqlite(db_url: &str, api_url: &str) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        let api = Arc::new(HttpSurveyApi::new()?);
        Ok(Self::from_parts(storage, api, ApiEndpoint::new(api_url)))
    }

    /// Wire services from already built parts.
    #[must_use]
    pub fn from_parts(storage: Storage, api: Arc<dyn SurveyApi>, endpoint: ApiEndpoint) -> Self {
        let session = Arc::clone(&storage.session);
        let gate = FlowGate::new(endpoint.clone(), Arc::clone(&session));
        let landing = Arc::new(LandingService::new(endpoint.clone(), Arc::clone(&api)));
        let navigator = Arc::new(QuestionNavigator::new(
            gate.clone(),
            Arc::clone(&api),
            Arc::clone(&session),
        ));
        let signup = Arc::new(SignupService::new(
            gate.clone(),
            Arc::clone(&api),
            Arc::clone(&session),
        ));
        let stats = Arc::new(StatsService::new(gate.clone(), api));

        Self {
            endpoint,
            session,
            gate,
            landing,
            navigator,
            signup,
            stats,
        }
    }

    #[must_use]
    pub fn endpoint(&self) -> ApiEndpoint {
        self.endpoint.clone()
    }

    #[must_use]
    pub fn session(&self) -> Arc<dyn SessionStore> {
        Arc::clone(&self.session)
    }

    #[must_use]
    pub fn gate(&self) -> FlowGate {
        self.gate.clone()
    }

    #[must_use]
    pub fn landing(&self) -> Arc<LandingService> {
        Arc::clone(&self.landing)
    }

    #[must_use]
    pub fn navigator(&self) -> Arc<QuestionNavigator> {
        Arc::clone(&self.navigator)
    }

    #[must_use]
    pub fn signup(&self) -> Arc<SignupService> {
        Arc::clone(&self.signup)
    }

    #[must_use]
    pub fn stats(&self) -> Arc<StatsService> {
        Arc::clone(&self.stats)
    }
}
