//! Question page state machine.
//!
//! `Loading -> Ready -> (NavigatingNext | Submitting)`. A failed load parks the
//! page in `LoadFailed`; a failed submission returns to `Ready` with the
//! selection intact. All transitions are synchronous so the machine can be
//! driven without a rendering surface.
//!
//! A submission appends the final answer before sending. When that send fails
//! the answer stays recorded, and a retry must replace it rather than append
//! a second one; `AdvanceStep::Submit::final_recorded` carries that fact.

use thiserror::Error;

use crate::model::{Choice, ChoiceId, Question, QuestionId, is_last_question, visible_choices};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigatorPhase {
    Loading,
    Ready,
    NavigatingNext,
    Submitting,
    LoadFailed,
}

/// Generation stamp of a load. Results carrying an outdated token are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadToken(u64);

/// Everything one question page needs, fetched together.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionPage {
    question: Question,
    choices: Vec<Choice>,
    total_questions: u64,
}

impl QuestionPage {
    /// Build a page from raw backend data; inactive choices are dropped and the
    /// rest ordered by descending `sqe`.
    #[must_use]
    pub fn new(question: Question, raw_choices: Vec<Choice>, total_questions: u64) -> Self {
        Self {
            question,
            choices: visible_choices(raw_choices),
            total_questions,
        }
    }

    #[must_use]
    pub fn question(&self) -> &Question {
        &self.question
    }

    #[must_use]
    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    #[must_use]
    pub fn total_questions(&self) -> u64 {
        self.total_questions
    }

    #[must_use]
    pub fn is_last_question(&self) -> bool {
        is_last_question(self.question.id(), self.total_questions)
    }
}

/// What the advance action must do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceStep {
    Next { choice: ChoiceId, next: QuestionId },
    Submit {
        choice: ChoiceId,
        final_recorded: bool,
    },
}

impl AdvanceStep {
    #[must_use]
    pub fn choice(&self) -> ChoiceId {
        match self {
            AdvanceStep::Next { choice, .. } | AdvanceStep::Submit { choice, .. } => *choice,
        }
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum NavigatorStateError {
    #[error("question is not ready")]
    NotReady,
    #[error("no choice selected")]
    NothingSelected,
    #[error("choice {0} is not offered on this question")]
    UnknownChoice(ChoiceId),
}

#[derive(Debug, Clone, PartialEq)]
pub struct NavigatorState {
    current: QuestionId,
    generation: u64,
    phase: NavigatorPhase,
    page: Option<QuestionPage>,
    selected: Option<Choice>,
    final_recorded: bool,
}

impl NavigatorState {
    /// State for a freshly entered question page, before the first load starts.
    #[must_use]
    pub fn new(current: QuestionId) -> Self {
        Self {
            current,
            generation: 0,
            phase: NavigatorPhase::Loading,
            page: None,
            selected: None,
            final_recorded: false,
        }
    }

    #[must_use]
    pub fn current_question_id(&self) -> QuestionId {
        self.current
    }

    #[must_use]
    pub fn phase(&self) -> NavigatorPhase {
        self.phase
    }

    #[must_use]
    pub fn page(&self) -> Option<&QuestionPage> {
        self.page.as_ref()
    }

    #[must_use]
    pub fn selected_choice(&self) -> Option<&Choice> {
        self.selected.as_ref()
    }

    /// Zero until a page has loaded.
    #[must_use]
    pub fn total_questions(&self) -> u64 {
        self.page.as_ref().map_or(0, QuestionPage::total_questions)
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.phase == NavigatorPhase::Loading
    }

    #[must_use]
    pub fn is_last_question(&self) -> bool {
        is_last_question(self.current, self.total_questions())
    }

    /// The advance action is only enabled on a ready page with a selection.
    #[must_use]
    pub fn can_advance(&self) -> bool {
        self.phase == NavigatorPhase::Ready && self.selected.is_some()
    }

    /// Start (or restart) loading `id`. Any earlier in-flight load becomes stale.
    pub fn begin_load(&mut self, id: QuestionId) -> LoadToken {
        self.generation = self.generation.wrapping_add(1);
        self.current = id;
        self.phase = NavigatorPhase::Loading;
        self.page = None;
        self.selected = None;
        self.final_recorded = false;
        LoadToken(self.generation)
    }

    #[must_use]
    pub fn is_current(&self, token: LoadToken) -> bool {
        token.0 == self.generation && self.phase == NavigatorPhase::Loading
    }

    /// Apply a finished load. Returns `false` if the result was stale and ignored.
    pub fn finish_load(&mut self, token: LoadToken, page: QuestionPage) -> bool {
        if !self.is_current(token) {
            return false;
        }
        self.page = Some(page);
        self.phase = NavigatorPhase::Ready;
        true
    }

    /// Record a failed load. Returns `false` if the failure was stale and ignored.
    pub fn fail_load(&mut self, token: LoadToken) -> bool {
        if !self.is_current(token) {
            return false;
        }
        self.phase = NavigatorPhase::LoadFailed;
        true
    }

    /// Select a choice offered on the ready page.
    ///
    /// # Errors
    ///
    /// Returns `NotReady` outside `Ready` and `UnknownChoice` for ids not on the page.
    pub fn select(&mut self, choice: ChoiceId) -> Result<(), NavigatorStateError> {
        if self.phase != NavigatorPhase::Ready {
            return Err(NavigatorStateError::NotReady);
        }
        let found = self
            .page
            .as_ref()
            .and_then(|page| page.choices().iter().find(|c| c.id() == choice))
            .cloned()
            .ok_or(NavigatorStateError::UnknownChoice(choice))?;
        self.selected = Some(found);
        Ok(())
    }

    /// Leave `Ready` for either `NavigatingNext` or `Submitting`.
    ///
    /// # Errors
    ///
    /// Returns `NotReady` outside `Ready` and `NothingSelected` without a selection.
    pub fn begin_advance(&mut self) -> Result<AdvanceStep, NavigatorStateError> {
        if self.phase != NavigatorPhase::Ready {
            return Err(NavigatorStateError::NotReady);
        }
        let choice = self
            .selected
            .as_ref()
            .map(Choice::id)
            .ok_or(NavigatorStateError::NothingSelected)?;
        if self.is_last_question() {
            self.phase = NavigatorPhase::Submitting;
            Ok(AdvanceStep::Submit {
                choice,
                final_recorded: self.final_recorded,
            })
        } else {
            self.phase = NavigatorPhase::NavigatingNext;
            Ok(AdvanceStep::Next {
                choice,
                next: self.current.next(),
            })
        }
    }

    /// Return to `Ready` after a failed advance; the selection is kept.
    ///
    /// `final_recorded` tells whether the failed submission had already
    /// appended the final answer to the session.
    pub fn advance_failed(&mut self, final_recorded: bool) {
        match self.phase {
            NavigatorPhase::Submitting => {
                self.final_recorded |= final_recorded;
                self.phase = NavigatorPhase::Ready;
            }
            NavigatorPhase::NavigatingNext => self.phase = NavigatorPhase::Ready,
            _ => {}
        }
    }
}
