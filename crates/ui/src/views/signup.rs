use dioxus::prelude::*;
use dioxus_router::use_navigator;

use services::SignupError;
use survey_core::SurveyStep;
use survey_core::model::{AgeGroup, Gender, QuestionId, SignupField};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{Notice, ViewError, report_error, use_notices, use_step_gate};
use crate::vm::{SignupEdit, SignupVm};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

#[component]
pub fn SignupView() -> Element {
    let ctx = use_context::<AppContext>();
    let signup = ctx.signup();
    let admitted = use_step_gate(SurveyStep::Signup);
    let notices = use_notices();
    let navigator = use_navigator();
    let mut vm = use_signal(SignupVm::default);

    let submit = use_callback(move |()| {
        let Some(form) = vm.write().begin_submit() else {
            return;
        };
        let signup = signup.clone();
        spawn(async move {
            match signup.register(&form).await {
                Ok(receipt) => {
                    vm.write().submit_failed(None);
                    match receipt.message {
                        Some(message) => notices.show(Notice::info(message)),
                        None => notices.dismiss(),
                    }
                    navigator.push(Route::Question {
                        id: QuestionId::FIRST,
                    });
                }
                Err(SignupError::Invalid(errors)) => {
                    vm.write().submit_failed(Some(errors));
                }
                Err(err) => {
                    vm.write().submit_failed(None);
                    report_error(notices, navigator, &ViewError::from(err));
                }
            }
        });
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<SignupTestHandles>() {
                handles.register(submit, vm);
            }
        }
    }

    let current = vm.read().clone();
    let form = current.form();
    let name_error = current.field_error(SignupField::Name);
    let email_error = current.field_error(SignupField::Email);
    let gender = form.gender.as_str();
    let age = form.age.as_str();

    rsx! {
        div { class: "page",
            h2 { "Sign up" }
            form {
                novalidate: true,
                onsubmit: move |evt: FormEvent| {
                    evt.prevent_default();
                    submit.call(());
                },
                div { class: "field",
                    label { r#for: "signup-name", "Name" }
                    input {
                        id: "signup-name",
                        value: "{form.name}",
                        oninput: move |evt| vm.write().edit(SignupEdit::Name(evt.value())),
                    }
                    if let Some(message) = name_error {
                        span { class: "field-error", "{message}" }
                    }
                }
                div { class: "field",
                    label { r#for: "signup-email", "Email" }
                    input {
                        id: "signup-email",
                        r#type: "email",
                        value: "{form.email}",
                        oninput: move |evt| vm.write().edit(SignupEdit::Email(evt.value())),
                    }
                    if let Some(message) = email_error {
                        span { class: "field-error", "{message}" }
                    }
                }
                div { class: "field",
                    label { r#for: "signup-gender", "Gender" }
                    select {
                        id: "signup-gender",
                        value: "{gender}",
                        onchange: move |evt| {
                            if let Some(gender) = Gender::from_value(&evt.value()) {
                                vm.write().edit(SignupEdit::Gender(gender));
                            }
                        },
                        for choice in Gender::ALL {
                            option {
                                value: choice.as_str(),
                                selected: choice.as_str() == gender,
                                "{choice.label()}"
                            }
                        }
                    }
                }
                div { class: "field",
                    label { r#for: "signup-age", "Age" }
                    select {
                        id: "signup-age",
                        value: "{age}",
                        onchange: move |evt| {
                            if let Some(age) = AgeGroup::from_value(&evt.value()) {
                                vm.write().edit(SignupEdit::Age(age));
                            }
                        },
                        for choice in AgeGroup::ALL {
                            option {
                                value: choice.as_str(),
                                selected: choice.as_str() == age,
                                "{choice.label()}"
                            }
                        }
                    }
                }
                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: !admitted() || current.is_submitting(),
                    if current.is_submitting() { "Signing up..." } else { "Sign up" }
                }
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct SignupTestHandles {
    submit: Rc<RefCell<Option<Callback<()>>>>,
    vm: Rc<RefCell<Option<Signal<SignupVm>>>>,
}

#[cfg(test)]
impl SignupTestHandles {
    pub(crate) fn register(&self, submit: Callback<()>, vm: Signal<SignupVm>) {
        *self.submit.borrow_mut() = Some(submit);
        *self.vm.borrow_mut() = Some(vm);
    }

    pub(crate) fn submit(&self) -> Callback<()> {
        (*self.submit.borrow()).expect("signup submit registered")
    }

    pub(crate) fn vm(&self) -> Signal<SignupVm> {
        (*self.vm.borrow()).expect("signup vm registered")
    }
}
