mod question_vm;
mod signup_vm;
mod stats_vm;

pub use question_vm::{AdvanceButtonVm, ChoiceVm, QuestionBody, QuestionVm, render_question};
pub use signup_vm::{SignupEdit, SignupVm};
pub use stats_vm::{BarVm, ChartBody, ChartVm, CHART_HEIGHT, CHART_WIDTH, map_stat_panels};
