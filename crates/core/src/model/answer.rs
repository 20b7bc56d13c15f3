use serde::{Deserialize, Serialize};

use crate::model::{ChoiceId, UserId};

/// One recorded selection. Serialized with the camelCase field names the
/// submission endpoint expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub user_id: UserId,
    pub choice_id: ChoiceId,
}

impl Answer {
    #[must_use]
    pub fn new(user_id: UserId, choice_id: ChoiceId) -> Self {
        Self { user_id, choice_id }
    }
}
