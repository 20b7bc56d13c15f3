mod gate;
mod intro;
mod landing;
mod notice;
mod question;
mod result;
mod signup;
mod state;

pub use gate::use_step_gate;
pub use intro::SurveyIntroView;
pub use landing::LandingView;
pub use notice::{
    Notice, NoticeBanner, NoticeKind, Notices, report_error, use_notice_provider, use_notices,
};
pub use question::QuestionView;
pub use result::ResultView;
pub use signup::SignupView;
pub use state::{ViewError, ViewState, view_state_from_resource};

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;
