use dioxus::prelude::*;
use dioxus_router::use_navigator;

use survey_core::SurveyStep;

use crate::context::AppContext;
use crate::views::{ViewError, report_error, use_notices};

/// Check the preconditions of `step` once the page mounts. The returned signal
/// turns true when the participant was admitted; otherwise they are sent back
/// to the main page with a notice.
pub fn use_step_gate(step: SurveyStep) -> Signal<bool> {
    let ctx = use_context::<AppContext>();
    let notices = use_notices();
    let navigator = use_navigator();
    let mut admitted = use_signal(|| false);

    use_future(move || {
        let gate = ctx.gate();
        async move {
            match gate.admit(step).await {
                Ok(_) => admitted.set(true),
                Err(err) => report_error(notices, navigator, &ViewError::from(err)),
            }
        }
    });

    admitted
}
