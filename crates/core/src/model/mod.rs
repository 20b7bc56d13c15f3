mod answer;
mod choice;
mod ids;
mod question;
mod signup;
mod stats;

pub use answer::Answer;
pub use choice::{Choice, visible_choices};
pub use ids::{ChoiceId, ParseIdError, QuestionId, UserId};
pub use question::{Question, is_last_question};
pub use signup::{
    AgeGroup, Gender, NAME_MAX_CHARS, SignupErrors, SignupField, SignupFieldError, SignupForm,
    SignupRequest,
};
pub use stats::{StatBar, StatChart, StatDecodeError, StatMetric, decode_stat};
