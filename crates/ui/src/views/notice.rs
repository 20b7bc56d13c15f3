use dioxus::prelude::*;
use dioxus_router::Navigator;

use crate::routes::Route;
use crate::views::ViewError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Blocking,
    Failure,
    Info,
}

impl NoticeKind {
    fn class(self) -> &'static str {
        match self {
            NoticeKind::Blocking => "notice--blocking",
            NoticeKind::Failure => "notice--failure",
            NoticeKind::Info => "notice--info",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    #[must_use]
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn from_error(err: &ViewError) -> Self {
        let kind = if err.is_blocked() {
            NoticeKind::Blocking
        } else {
            NoticeKind::Failure
        };
        Self {
            kind,
            text: err.message(),
        }
    }
}

/// The single user-facing message slot shared by every page.
#[derive(Clone, Copy, PartialEq)]
pub struct Notices {
    current: Signal<Option<Notice>>,
}

impl Notices {
    pub fn show(mut self, notice: Notice) {
        self.current.set(Some(notice));
    }

    pub fn dismiss(mut self) {
        self.current.set(None);
    }

    #[must_use]
    pub fn current(&self) -> Option<Notice> {
        self.current.read().clone()
    }
}

pub fn use_notice_provider() -> Notices {
    use_context_provider(|| Notices {
        current: Signal::new(None),
    })
}

#[must_use]
pub fn use_notices() -> Notices {
    use_context::<Notices>()
}

/// Show one notice for `err`. Blocked steps also send the participant back to
/// the main page.
pub fn report_error(notices: Notices, navigator: Navigator, err: &ViewError) {
    tracing::debug!(message = %err.message(), "reporting view error");
    notices.show(Notice::from_error(err));
    if err.is_blocked() {
        navigator.replace(Route::Landing {});
    }
}

#[component]
pub fn NoticeBanner() -> Element {
    let notices = use_notices();
    let Some(notice) = notices.current() else {
        return rsx! {};
    };
    let class = notice.kind.class();

    rsx! {
        div { class: "notice {class}", role: "alert",
            span { "{notice.text}" }
            button {
                class: "btn btn-secondary",
                r#type: "button",
                onclick: move |_| notices.dismiss(),
                "Dismiss"
            }
        }
    }
}
