use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};

use services::{AdvanceOutcome, QuestionEntry};
use survey_core::NavigatorState;
use survey_core::model::{ChoiceId, QuestionId};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{Notice, ViewError, report_error, use_notices};
use crate::vm::{ChoiceVm, QuestionBody, render_question};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum QuestionIntent {
    Select(ChoiceId),
    Advance,
}

#[component]
pub fn QuestionView(id: QuestionId) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator_svc = ctx.navigator();
    let notices = use_notices();
    let navigator = use_navigator();

    let mut state = use_signal(|| NavigatorState::new(id));
    let mut entry = use_signal(|| None::<QuestionEntry>);

    // Restarts whenever the route id changes; the token drops late results.
    let _load = {
        let navigator_svc = navigator_svc.clone();
        use_resource(use_reactive((&id,), move |(id,)| {
            let navigator_svc = navigator_svc.clone();
            async move {
                let token = state.write().begin_load(id);
                entry.set(None);

                let admitted = match navigator_svc.enter(id).await {
                    Ok(admitted) => admitted,
                    Err(err) => {
                        if state.peek().is_current(token) {
                            report_error(notices, navigator, &ViewError::from(err));
                        }
                        return;
                    }
                };

                match navigator_svc.load(&admitted, id).await {
                    Ok(page) => {
                        if state.write().finish_load(token, page) {
                            entry.set(Some(admitted));
                        }
                    }
                    Err(err) => {
                        if state.write().fail_load(token) {
                            report_error(notices, navigator, &ViewError::from(err));
                        }
                    }
                }
            }
        }))
    };

    let dispatch = use_callback(move |intent: QuestionIntent| match intent {
        QuestionIntent::Select(choice) => {
            if let Err(err) = state.write().select(choice) {
                tracing::debug!(error = %err, "selection ignored");
            }
        }
        QuestionIntent::Advance => {
            let Some(admitted) = entry.read().clone() else {
                return;
            };
            let step = match state.write().begin_advance() {
                Ok(step) => step,
                Err(err) => {
                    tracing::debug!(error = %err, "advance ignored");
                    return;
                }
            };
            let navigator_svc = navigator_svc.clone();
            spawn(async move {
                match navigator_svc.advance(&admitted, step).await {
                    Ok(AdvanceOutcome::Navigate(next)) => {
                        navigator.push(Route::Question { id: next });
                    }
                    Ok(AdvanceOutcome::Submitted { .. }) => {
                        notices.show(Notice::info("Thank you! Your answers were submitted."));
                        navigator.push(Route::Results {});
                    }
                    Err(err) => {
                        state.write().advance_failed(err.final_recorded);
                        report_error(notices, navigator, &ViewError::from(err));
                    }
                }
            });
        }
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<QuestionTestHandles>() {
                handles.register(dispatch, state);
            }
        }
    }

    let vm = render_question(&state.read());

    rsx! {
        div { class: "page",
            h2 { "{vm.heading}" }
            match vm.body {
                QuestionBody::Loading => rsx! {
                    p { class: "loading", "Loading..." }
                },
                QuestionBody::Unavailable => rsx! {
                    p { "This question could not be loaded." }
                    Link { to: Route::Landing {}, "Back to the main page" }
                },
                QuestionBody::Ready { title, image_url, choices } => rsx! {
                    h3 { class: "question-title", "{title}" }
                    if let Some(src) = image_url {
                        img { class: "question-image", src: "{src}", alt: "{title}" }
                    }
                    ul { class: "choices",
                        for choice in choices {
                            ChoiceRow { key: "{choice.id}", choice, dispatch }
                        }
                    }
                    if let Some(busy) = vm.busy {
                        p { class: "loading", "{busy}" }
                    }
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        disabled: !vm.advance.enabled,
                        onclick: move |_| dispatch.call(QuestionIntent::Advance),
                        "{vm.advance.label}"
                    }
                },
            }
        }
    }
}

#[component]
fn ChoiceRow(choice: ChoiceVm, dispatch: Callback<QuestionIntent>) -> Element {
    let input_id = format!("choice-{}", choice.id);
    let choice_id = ChoiceId::new(choice.id);

    rsx! {
        li { class: "choice",
            input {
                id: "{input_id}",
                r#type: "radio",
                name: "choice",
                checked: choice.selected,
                onchange: move |_| dispatch.call(QuestionIntent::Select(choice_id)),
            }
            label { r#for: "{input_id}", "{choice.content}" }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct QuestionTestHandles {
    dispatch: Rc<RefCell<Option<Callback<QuestionIntent>>>>,
    state: Rc<RefCell<Option<Signal<NavigatorState>>>>,
}

#[cfg(test)]
impl QuestionTestHandles {
    pub(crate) fn register(
        &self,
        dispatch: Callback<QuestionIntent>,
        state: Signal<NavigatorState>,
    ) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.state.borrow_mut() = Some(state);
    }

    pub(crate) fn dispatch(&self) -> Callback<QuestionIntent> {
        (*self.dispatch.borrow()).expect("question dispatch registered")
    }

    pub(crate) fn state(&self) -> Signal<NavigatorState> {
        (*self.state.borrow()).expect("question state registered")
    }
}
