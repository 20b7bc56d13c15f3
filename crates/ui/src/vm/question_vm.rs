use survey_core::{NavigatorPhase, NavigatorState};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChoiceVm {
    pub id: u64,
    pub content: String,
    pub selected: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdvanceButtonVm {
    pub label: &'static str,
    pub enabled: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuestionBody {
    Loading,
    /// The load failed; the participant has to navigate away themselves.
    Unavailable,
    Ready {
        title: String,
        image_url: Option<String>,
        choices: Vec<ChoiceVm>,
    },
}

/// Everything the question page draws, derived from the navigator state alone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub heading: String,
    pub body: QuestionBody,
    pub advance: AdvanceButtonVm,
    pub busy: Option<&'static str>,
}

#[must_use]
pub fn render_question(state: &NavigatorState) -> QuestionVm {
    let current = state.current_question_id();
    let heading = match state.total_questions() {
        0 => format!("Question {current}"),
        total => format!("Question {current} of {total}"),
    };

    let body = match (state.phase(), state.page()) {
        (NavigatorPhase::LoadFailed, _) => QuestionBody::Unavailable,
        (_, None) => QuestionBody::Loading,
        (_, Some(page)) => {
            let selected = state.selected_choice().map(|choice| choice.id());
            QuestionBody::Ready {
                title: page.question().title().to_string(),
                image_url: page.question().image_url().map(str::to_string),
                choices: page
                    .choices()
                    .iter()
                    .map(|choice| ChoiceVm {
                        id: choice.id().value(),
                        content: choice.content().to_string(),
                        selected: selected == Some(choice.id()),
                    })
                    .collect(),
            }
        }
    };

    let label = if state.is_last_question() {
        "Submit"
    } else {
        "Next"
    };
    let busy = match state.phase() {
        NavigatorPhase::Loading => Some("Loading..."),
        NavigatorPhase::NavigatingNext => Some("Saving..."),
        NavigatorPhase::Submitting => Some("Submitting..."),
        NavigatorPhase::Ready | NavigatorPhase::LoadFailed => None,
    };

    QuestionVm {
        heading,
        body,
        advance: AdvanceButtonVm {
            label,
            enabled: state.can_advance(),
        },
        busy,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use survey_core::QuestionPage;
    use survey_core::model::{Choice, ChoiceId, Question, QuestionId};

    fn ready_state(id: u64, total: u64) -> NavigatorState {
        let id = QuestionId::new(id);
        let mut state = NavigatorState::new(id);
        let token = state.begin_load(id);
        let page = QuestionPage::new(
            Question::new(id, "Favourite season?", Some("http://img/1.png".to_string())),
            vec![
                Choice::new(ChoiceId::new(1), "Spring", 2.0, true),
                Choice::new(ChoiceId::new(2), "Summer", 5.0, false),
                Choice::new(ChoiceId::new(3), "Autumn", 2.0, true),
            ],
            total,
        );
        assert!(state.finish_load(token, page));
        state
    }

    #[test]
    fn loading_state_renders_placeholder() {
        let mut state = NavigatorState::new(QuestionId::FIRST);
        state.begin_load(QuestionId::FIRST);
        let vm = render_question(&state);
        assert_eq!(vm.body, QuestionBody::Loading);
        assert_eq!(vm.busy, Some("Loading..."));
        assert!(!vm.advance.enabled);
        assert_eq!(vm.heading, "Question 1");
    }

    #[test]
    fn ready_state_lists_visible_choices() {
        let vm = render_question(&ready_state(3, 5));
        assert_eq!(vm.heading, "Question 3 of 5");
        let QuestionBody::Ready { title, choices, image_url } = vm.body else {
            panic!("expected ready body");
        };
        assert_eq!(title, "Favourite season?");
        assert_eq!(image_url.as_deref(), Some("http://img/1.png"));
        let ids: Vec<u64> = choices.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert!(choices.iter().all(|c| !c.selected));
        assert_eq!(vm.advance.label, "Next");
        assert!(!vm.advance.enabled);
    }

    #[test]
    fn selection_enables_advance_and_marks_choice() {
        let mut state = ready_state(2, 2);
        state.select(ChoiceId::new(3)).unwrap();
        let vm = render_question(&state);
        assert_eq!(vm.advance.label, "Submit");
        assert!(vm.advance.enabled);
        let QuestionBody::Ready { choices, .. } = vm.body else {
            panic!("expected ready body");
        };
        assert!(choices.iter().any(|c| c.id == 3 && c.selected));
    }

    #[test]
    fn failed_load_is_unavailable() {
        let mut state = NavigatorState::new(QuestionId::FIRST);
        let token = state.begin_load(QuestionId::FIRST);
        assert!(state.fail_load(token));
        let vm = render_question(&state);
        assert_eq!(vm.body, QuestionBody::Unavailable);
        assert_eq!(vm.busy, None);
    }

    #[test]
    fn submitting_keeps_page_and_shows_progress() {
        let mut state = ready_state(1, 1);
        state.select(ChoiceId::new(1)).unwrap();
        state.begin_advance().unwrap();
        let vm = render_question(&state);
        assert_eq!(vm.busy, Some("Submitting..."));
        assert!(!vm.advance.enabled);
        assert!(matches!(vm.body, QuestionBody::Ready { .. }));
    }
}
