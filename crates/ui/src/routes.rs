use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use survey_core::SurveyStep;
use survey_core::model::QuestionId;

use crate::views::{
    LandingView, NoticeBanner, QuestionView, ResultView, SignupView, SurveyIntroView,
};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", LandingView)] Landing {},
        #[route("/survey", SurveyIntroView)] Survey {},
        #[route("/signup", SignupView)] Signup {},
        #[route("/question/:id", QuestionView)] Question { id: QuestionId },
        #[route("/result", ResultView)] Results {},
}

impl From<SurveyStep> for Route {
    fn from(step: SurveyStep) -> Self {
        match step {
            SurveyStep::Landing => Route::Landing {},
            SurveyStep::Intro => Route::Survey {},
            SurveyStep::Signup => Route::Signup {},
            SurveyStep::Question(id) => Route::Question { id },
            SurveyStep::Result => Route::Results {},
        }
    }
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            header { class: "topbar",
                h1 { "Survey" }
                Link { to: Route::Landing {}, "Main page" }
            }
            NoticeBanner {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}
