use crate::model::QuestionId;

/// A survey question as presented on one question page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    title: String,
    image_url: Option<String>,
}

impl Question {
    #[must_use]
    pub fn new(id: QuestionId, title: impl Into<String>, image_url: Option<String>) -> Self {
        let image_url = image_url.filter(|url| !url.trim().is_empty());
        Self {
            id,
            title: title.into(),
            image_url,
        }
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }
}

/// Whether `current` is the terminal question of a survey with `total` questions.
///
/// Only exact equality counts. A total of zero, or an id past the total, is never last.
#[must_use]
pub fn is_last_question(current: QuestionId, total: u64) -> bool {
    total != 0 && current.value() == total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_image_is_dropped() {
        let question = Question::new(QuestionId::new(1), "Title", Some("  ".into()));
        assert_eq!(question.image_url(), None);
    }

    #[test]
    fn last_question_is_exact_equality() {
        assert!(is_last_question(QuestionId::new(1), 1));
        assert!(is_last_question(QuestionId::new(5), 5));
        assert!(!is_last_question(QuestionId::new(3), 5));
        assert!(!is_last_question(QuestionId::new(6), 5));
        assert!(!is_last_question(QuestionId::new(1), 0));
    }
}
