use dioxus::prelude::*;
use dioxus_router::use_navigator;

use survey_core::SurveyStep;

use crate::routes::Route;
use crate::views::use_step_gate;

#[component]
pub fn SurveyIntroView() -> Element {
    let admitted = use_step_gate(SurveyStep::Intro);
    let navigator = use_navigator();

    rsx! {
        div { class: "page",
            h2 { "About this survey" }
            p {
                "You will answer a short series of questions, one at a time. "
                "Pick one option per question; your answers are sent together at the end."
            }
            p { "Sign up first so your answers can be recorded." }
            button {
                class: "btn btn-primary",
                r#type: "button",
                disabled: !admitted(),
                onclick: move |_| {
                    navigator.push(Route::Signup {});
                },
                "Start signup"
            }
        }
    }
}
