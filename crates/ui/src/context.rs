use std::sync::Arc;

use services::{
    ApiEndpoint, AppServices, FlowGate, LandingService, QuestionNavigator, SignupService,
    StatsService,
};

pub trait UiApp: Send + Sync {
    fn endpoint(&self) -> ApiEndpoint;
    fn gate(&self) -> FlowGate;

    fn landing(&self) -> Arc<LandingService>;
    fn navigator(&self) -> Arc<QuestionNavigator>;
    fn signup(&self) -> Arc<SignupService>;
    fn stats(&self) -> Arc<StatsService>;
}

impl UiApp for AppServices {
    fn endpoint(&self) -> ApiEndpoint {
        AppServices::endpoint(self)
    }

    fn gate(&self) -> FlowGate {
        AppServices::gate(self)
    }

    fn landing(&self) -> Arc<LandingService> {
        AppServices::landing(self)
    }

    fn navigator(&self) -> Arc<QuestionNavigator> {
        AppServices::navigator(self)
    }

    fn signup(&self) -> Arc<SignupService> {
        AppServices::signup(self)
    }

    fn stats(&self) -> Arc<StatsService> {
        AppServices::stats(self)
    }
}

#[derive(Clone)]
pub struct AppContext {
    endpoint: ApiEndpoint,
    gate: FlowGate,
    landing: Arc<LandingService>,
    navigator: Arc<QuestionNavigator>,
    signup: Arc<SignupService>,
    stats: Arc<StatsService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            endpoint: app.endpoint(),
            gate: app.gate(),
            landing: app.landing(),
            navigator: app.navigator(),
            signup: app.signup(),
            stats: app.stats(),
        }
    }

    /// Shared handle to the API URL typed on the landing page.
    #[must_use]
    pub fn endpoint(&self) -> ApiEndpoint {
        self.endpoint.clone()
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

// This context is provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
