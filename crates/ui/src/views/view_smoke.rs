use std::sync::atomic::{AtomicBool, Ordering};

use survey_core::NavigatorPhase;
use survey_core::model::{ChoiceId, UserId};

use super::question::QuestionIntent;
use super::test_harness::{FakeSurveyApi, ViewHarness, ViewKind, setup_view_harness};
use crate::vm::SignupEdit;

async fn registered_question_harness(id: u64, total: u64) -> ViewHarness {
    registered_question_harness_with(id, FakeSurveyApi::with_total(total)).await
}

async fn registered_question_harness_with(id: u64, api: FakeSurveyApi) -> ViewHarness {
    let mut harness = setup_view_harness(ViewKind::Question(id), "http://api.test", api);
    harness
        .session()
        .set_user_id(&UserId::new("5").unwrap())
        .await
        .expect("set user");
    harness.rebuild();
    harness.settle().await;
    harness
}

#[tokio::test(flavor = "current_thread")]
async fn landing_view_smoke_renders_url_field() {
    let mut harness = setup_view_harness(
        ViewKind::Landing,
        "http://api.test",
        FakeSurveyApi::default(),
    );
    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Fetch data"), "missing probe button in {html}");
    assert!(html.contains("http://api.test"), "missing url in {html}");
    assert_eq!(harness.api.calls(), 0);
}

#[tokio::test(flavor = "current_thread")]
async fn intro_without_url_redirects_with_notice() {
    let mut harness = setup_view_harness(ViewKind::Intro, "", FakeSurveyApi::default());
    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("harness-main-page"), "no redirect in {html}");
    assert!(
        html.contains("The API URL is not set"),
        "missing notice in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn question_without_url_redirects_before_any_request() {
    let mut harness = setup_view_harness(
        ViewKind::Question(1),
        "",
        FakeSurveyApi::with_total(5),
    );
    harness
        .session()
        .set_user_id(&UserId::new("5").unwrap())
        .await
        .unwrap();
    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("harness-main-page"), "no redirect in {html}");
    assert!(html.contains("The API URL is not set"), "missing notice in {html}");
    assert_eq!(harness.api.calls(), 0);
}

#[tokio::test(flavor = "current_thread")]
async fn question_without_user_redirects() {
    let mut harness = setup_view_harness(
        ViewKind::Question(1),
        "http://api.test",
        FakeSurveyApi::with_total(5),
    );
    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("harness-main-page"), "no redirect in {html}");
    assert!(html.contains("Please sign up"), "missing notice in {html}");
    assert_eq!(harness.api.calls(), 0);
}

#[tokio::test(flavor = "current_thread")]
async fn question_view_smoke_renders_active_choices() {
    let harness = registered_question_harness(3, 5).await;
    let html = harness.render();
    assert!(html.contains("Question 3 of 5"), "missing heading in {html}");
    assert!(html.contains("Title 3"), "missing title in {html}");
    assert!(html.contains("Often"), "missing choice in {html}");
    assert!(html.contains("Rarely"), "missing choice in {html}");
    assert!(!html.contains("Hidden"), "inactive choice shown in {html}");
    let often = html.find("Often").unwrap();
    let rarely = html.find("Rarely").unwrap();
    assert!(often < rarely, "tie order not preserved in {html}");
    assert!(html.contains("Next"), "missing next button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn failed_choice_request_leaves_question_unavailable() {
    let api = FakeSurveyApi {
        fail_choices: AtomicBool::new(true),
        ..FakeSurveyApi::with_total(5)
    };
    let mut harness = registered_question_harness_with(2, api).await;
    harness.settle().await;

    let html = harness.render();
    assert!(
        html.contains("This question could not be loaded."),
        "missing unavailable body in {html}"
    );
    assert_eq!(
        html.matches("Could not load the question: choices unavailable").count(),
        1,
        "expected one failure notice in {html}"
    );
    assert!(!html.contains("harness-navigated"), "navigated in {html}");
    assert!(!html.contains("harness-main-page"), "redirected in {html}");
    assert_eq!(harness.api.calls(), 3);
    let state = harness.question_handles.state();
    let phase = harness.dom.in_runtime(|| state.read().phase());
    assert_eq!(phase, NavigatorPhase::LoadFailed);
}

#[tokio::test(flavor = "current_thread")]
async fn advancing_records_answer_and_navigates() {
    let mut harness = registered_question_harness(1, 3).await;
    let dispatch = harness.question_handles.dispatch();

    harness.call(dispatch, QuestionIntent::Select(ChoiceId::new(3)));
    harness.call(dispatch, QuestionIntent::Advance);
    harness.settle().await;

    let html = harness.render();
    assert!(
        html.contains("Navigated to /question/2"),
        "no navigation in {html}"
    );
    let answers = harness.session().get_answers().await.unwrap();
    assert_eq!(answers.len(), 1);
    assert_eq!(answers[0].choice_id, ChoiceId::new(3));
}

#[tokio::test(flavor = "current_thread")]
async fn failed_submission_keeps_selection_and_answers() {
    let mut harness = registered_question_harness(2, 2).await;
    harness.api.fail_submit.store(true, Ordering::SeqCst);
    let dispatch = harness.question_handles.dispatch();

    harness.call(dispatch, QuestionIntent::Select(ChoiceId::new(1)));
    harness.drive_async().await;
    assert!(harness.render().contains("Submit"));

    harness.call(dispatch, QuestionIntent::Advance);
    harness.settle().await;

    let html = harness.render();
    assert!(
        html.contains("Could not submit your answers: submission closed"),
        "missing failure notice in {html}"
    );
    assert!(!html.contains("harness-navigated"), "navigated in {html}");
    let state = harness.question_handles.state();
    let selected = harness
        .dom
        .in_runtime(|| state.read().selected_choice().map(|c| c.id()));
    assert_eq!(selected, Some(ChoiceId::new(1)));
    assert_eq!(harness.session().get_answers().await.unwrap().len(), 1);
}

#[tokio::test(flavor = "current_thread")]
async fn signup_with_empty_name_shows_field_error_without_request() {
    let mut harness = setup_view_harness(
        ViewKind::Signup,
        "http://api.test",
        FakeSurveyApi::default(),
    );
    harness.rebuild();
    harness.settle().await;

    let vm = harness.signup_handles.vm();
    harness.dom.in_runtime(|| {
        let mut vm = vm;
        vm.write()
            .edit(SignupEdit::Email("ann@example.com".to_string()));
    });
    harness.call(harness.signup_handles.submit(), ());
    harness.settle().await;

    let html = harness.render();
    assert!(
        html.contains("Please enter your name."),
        "missing field error in {html}"
    );
    assert_eq!(harness.api.calls(), 0);
}

#[tokio::test(flavor = "current_thread")]
async fn signup_success_stores_user_and_starts_questions() {
    let mut harness = setup_view_harness(
        ViewKind::Signup,
        "http://api.test",
        FakeSurveyApi::default(),
    );
    harness.rebuild();
    harness.settle().await;

    let vm = harness.signup_handles.vm();
    harness.dom.in_runtime(|| {
        let mut vm = vm;
        let mut guard = vm.write();
        guard.edit(SignupEdit::Name("Ann".to_string()));
        guard.edit(SignupEdit::Email("ann@example.com".to_string()));
    });
    harness.call(harness.signup_handles.submit(), ());
    harness.settle().await;

    let html = harness.render();
    assert!(
        html.contains("Navigated to /question/1"),
        "no navigation in {html}"
    );
    let user = harness.session().get_user_id().await.unwrap();
    assert_eq!(user.map(|u| u.as_str().to_string()), Some("9".to_string()));
}

#[tokio::test(flavor = "current_thread")]
async fn result_view_smoke_renders_every_chart() {
    let mut harness = setup_view_harness(
        ViewKind::Result,
        "http://api.test",
        FakeSurveyApi::default(),
    );
    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    for index in 1..=8 {
        let title = format!("Chart {index}");
        assert!(html.contains(&title), "missing {title} in {html}");
    }
    assert!(html.contains("<rect"), "missing bars in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn result_view_smoke_renders_error_state() {
    let api = FakeSurveyApi::default();
    api.fail_stats.store(true, Ordering::SeqCst);
    let mut harness = setup_view_harness(ViewKind::Result, "http://api.test", api);
    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    assert!(
        html.contains("Could not load the statistics: stats offline"),
        "missing error in {html}"
    );
    assert!(!html.contains("Chart 1"), "partial charts in {html}");
}
