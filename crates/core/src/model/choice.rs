use std::cmp::Ordering;

use crate::model::ChoiceId;

/// A selectable answer option of a question.
#[derive(Debug, Clone, PartialEq)]
pub struct Choice {
    id: ChoiceId,
    content: String,
    sqe: f64,
    is_active: bool,
}

impl Choice {
    #[must_use]
    pub fn new(id: ChoiceId, content: impl Into<String>, sqe: f64, is_active: bool) -> Self {
        Self {
            id,
            content: content.into(),
            sqe,
            is_active,
        }
    }

    #[must_use]
    pub fn id(&self) -> ChoiceId {
        self.id
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Manual sort key; higher values are shown first.
    #[must_use]
    pub fn sqe(&self) -> f64 {
        self.sqe
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.is_active
    }
}

/// Keep only active choices, ordered by descending `sqe`.
///
/// Choices with equal `sqe` keep their input order: the backend supplies no secondary key,
/// so the sort must be stable.
#[must_use]
pub fn visible_choices(raw: Vec<Choice>) -> Vec<Choice> {
    let mut kept: Vec<Choice> = raw.into_iter().filter(Choice::is_active).collect();
    kept.sort_by(|left, right| descending_sqe(left.sqe, right.sqe));
    kept
}

fn descending_sqe(left: f64, right: f64) -> Ordering {
    right.partial_cmp(&left).unwrap_or(Ordering::Equal)
}
