use std::cell::Cell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Outlet, Routable, Router, use_navigator};
use serde_json::{Value, json};
use services::{ApiConfig, ApiEndpoint, ApiError, AppServices, SignupReceipt, StatusCode, SurveyApi};
use storage::repository::{SessionStore, Storage};
use survey_core::model::{
    Answer, Choice, ChoiceId, Question, QuestionId, SignupRequest, StatMetric, UserId,
};

use crate::context::{UiApp, build_app_context};
use crate::views::question::QuestionTestHandles;
use crate::views::signup::SignupTestHandles;
use crate::views::{
    LandingView, NoticeBanner, QuestionView, ResultView, SignupView, SurveyIntroView,
    use_notice_provider,
};

/// Canned backend: `total` questions, three choices each, one of them inactive.
#[derive(Default)]
pub struct FakeSurveyApi {
    pub total: u64,
    pub calls: AtomicUsize,
    pub fail_submit: AtomicBool,
    pub fail_choices: AtomicBool,
    pub fail_stats: AtomicBool,
}

impl FakeSurveyApi {
    pub fn with_total(total: u64) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    fn server_error(message: &str) -> ApiError {
        ApiError::HttpStatus {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: Some(message.to_string()),
        }
    }
}

#[async_trait]
impl SurveyApi for FakeSurveyApi {
    async fn probe(&self, _api: &ApiConfig) -> Result<Value, ApiError> {
        self.hit();
        Ok(json!({"service": "survey"}))
    }

    async fn fetch_question(&self, _api: &ApiConfig, id: QuestionId) -> Result<Question, ApiError> {
        self.hit();
        Ok(Question::new(id, format!("Title {id}"), None))
    }

    async fn fetch_choices(
        &self,
        _api: &ApiConfig,
        _id: QuestionId,
    ) -> Result<Vec<Choice>, ApiError> {
        self.hit();
        if self.fail_choices.load(Ordering::SeqCst) {
            return Err(Self::server_error("choices unavailable"));
        }
        Ok(vec![
            Choice::new(ChoiceId::new(1), "Often", 2.0, true),
            Choice::new(ChoiceId::new(2), "Hidden", 5.0, false),
            Choice::new(ChoiceId::new(3), "Rarely", 2.0, true),
        ])
    }

    async fn question_count(&self, _api: &ApiConfig) -> Result<u64, ApiError> {
        self.hit();
        Ok(self.total)
    }

    async fn submit_answers(&self, _api: &ApiConfig, _answers: &[Answer]) -> Result<(), ApiError> {
        self.hit();
        if self.fail_submit.load(Ordering::SeqCst) {
            return Err(Self::server_error("submission closed"));
        }
        Ok(())
    }

    async fn signup(
        &self,
        _api: &ApiConfig,
        _request: &SignupRequest,
    ) -> Result<SignupReceipt, ApiError> {
        self.hit();
        Ok(SignupReceipt {
            user_id: UserId::new("9").expect("user id"),
            message: None,
        })
    }

    async fn fetch_stat(&self, _api: &ApiConfig, metric: StatMetric) -> Result<Value, ApiError> {
        self.hit();
        if self.fail_stats.load(Ordering::SeqCst) && metric == StatMetric::ALL[3] {
            return Err(Self::server_error("stats offline"));
        }
        Ok(json!([{"label": "a", "count": 2}, {"label": "b", "count": 4}]))
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Landing,
    Intro,
    Signup,
    Question(u64),
    Result,
}

#[derive(Clone, Default)]
struct Started(Rc<Cell<bool>>);

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<AppServices>,
    view: ViewKind,
    signup_handles: SignupTestHandles,
    question_handles: QuestionTestHandles,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    use_context_provider(Started::default);
    use_context_provider(|| props.signup_handles.clone());
    use_context_provider(|| props.question_handles.clone());
    use_notice_provider();
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[layout(HarnessLayout)]
        #[route("/")]
        Root {},
        #[route("/view")]
        View {},
        #[route("/:..segments")]
        Elsewhere { segments: Vec<String> },
}

#[component]
fn HarnessLayout() -> Element {
    rsx! {
        NoticeBanner {}
        Outlet::<TestRoute> {}
    }
}

/// The first visit forwards to the view under test; any later visit means the
/// view sent the participant back to the main page.
#[component]
fn Root() -> Element {
    let started = use_context::<Started>();
    let navigator = use_navigator();
    let first_visit = use_hook(|| !started.0.replace(true));
    use_effect(move || {
        if first_visit {
            navigator.replace(TestRoute::View {});
        }
    });
    if first_visit {
        return rsx! {};
    }
    rsx! { p { class: "harness-main-page", "Back on the main page" } }
}

#[component]
fn View() -> Element {
    match use_context::<ViewKind>() {
        ViewKind::Landing => rsx! { LandingView {} },
        ViewKind::Intro => rsx! { SurveyIntroView {} },
        ViewKind::Signup => rsx! { SignupView {} },
        ViewKind::Question(id) => rsx! { QuestionView { id: QuestionId::new(id) } },
        ViewKind::Result => rsx! { ResultView {} },
    }
}

#[component]
fn Elsewhere(segments: Vec<String>) -> Element {
    let path = segments.join("/");
    rsx! { p { class: "harness-navigated", "Navigated to /{path}" } }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub services: AppServices,
    pub api: Arc<FakeSurveyApi>,
    pub signup_handles: SignupTestHandles,
    pub question_handles: QuestionTestHandles,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Drive until spawned tasks and navigations have settled.
    pub async fn settle(&mut self) {
        for _ in 0..6 {
            self.drive_async().await;
        }
    }

    pub fn call<T: 'static>(&self, callback: Callback<T>, value: T) {
        self.dom.in_runtime(|| callback.call(value));
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }

    pub fn session(&self) -> Arc<dyn SessionStore> {
        self.services.session()
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(view: ViewKind, api_url: &str, api: FakeSurveyApi) -> ViewHarness {
    let api = Arc::new(api);
    let services = AppServices::from_parts(
        Storage::in_memory(),
        Arc::clone(&api) as Arc<dyn SurveyApi>,
        ApiEndpoint::new(api_url),
    );
    let signup_handles = SignupTestHandles::default();
    let question_handles = QuestionTestHandles::default();

    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app: Arc::new(services.clone()),
            view,
            signup_handles: signup_handles.clone(),
            question_handles: question_handles.clone(),
        },
    );

    ViewHarness {
        dom,
        services,
        api,
        signup_handles,
        question_handles,
    }
}
