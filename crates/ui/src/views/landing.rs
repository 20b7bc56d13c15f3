use dioxus::prelude::*;
use dioxus_router::use_navigator;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{Notice, ViewError, ViewState, use_notices};

#[component]
pub fn LandingView() -> Element {
    let ctx = use_context::<AppContext>();
    let landing = ctx.landing();
    let notices = use_notices();
    let navigator = use_navigator();

    let mut api_url = use_signal(|| landing.api_url());
    let mut probe = use_signal(|| ViewState::<String>::Idle);

    let on_input = {
        let landing = landing.clone();
        move |evt: FormEvent| {
            let value = evt.value();
            landing.set_api_url(value.clone());
            api_url.set(value);
        }
    };

    let on_fetch = {
        let landing = landing.clone();
        move |_| {
            let landing = landing.clone();
            probe.set(ViewState::Loading);
            spawn(async move {
                match landing.probe().await {
                    Ok(text) => probe.set(ViewState::Ready(text)),
                    Err(err) => {
                        let err = ViewError::from(err);
                        // Already on the main page: show the notice, skip the redirect.
                        notices.show(Notice::from_error(&err));
                        probe.set(ViewState::Error(err));
                    }
                }
            });
        }
    };

    let on_next = move |_| {
        navigator.push(Route::Survey {});
    };

    rsx! {
        div { class: "page",
            h2 { "Welcome" }
            p { "Enter the address of the survey API to begin." }
            div { class: "field",
                label { r#for: "api-url", "API URL" }
                input {
                    id: "api-url",
                    r#type: "url",
                    placeholder: "http://localhost:8000",
                    value: "{api_url}",
                    oninput: on_input,
                }
            }
            div { class: "actions",
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    onclick: on_fetch,
                    "Fetch data"
                }
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    onclick: on_next,
                    "Next"
                }
            }
            match probe() {
                ViewState::Idle => rsx! {},
                ViewState::Loading => rsx! {
                    p { class: "loading", "Loading..." }
                },
                ViewState::Ready(text) => rsx! {
                    pre { class: "probe-output", "{text}" }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "field-error", "{err.message()}" }
                },
            }
        }
    }
}
