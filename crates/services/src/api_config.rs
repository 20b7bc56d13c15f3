use std::sync::{Arc, RwLock};

/// Immutable snapshot of the backend base URL.
///
/// Only blank input is rejected; anything else is taken as typed and simply
/// fails at request time if it is not a reachable URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
}

impl ApiConfig {
    #[must_use]
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return None;
        }
        Some(Self {
            base_url: trimmed.to_string(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for `path` below the base URL.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

/// The API URL typed on the landing page, shared by every page of the app.
///
/// Not persisted; a relaunch starts empty unless pre-filled by configuration.
#[derive(Clone, Debug, Default)]
pub struct ApiEndpoint {
    url: Arc<RwLock<String>>,
}

impl ApiEndpoint {
    #[must_use]
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            url: Arc::new(RwLock::new(initial.into())),
        }
    }

    /// The raw URL as typed; empty when unset.
    #[must_use]
    pub fn get_api_url(&self) -> String {
        self.url
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    pub fn set_api_url(&self, url: impl Into<String>) {
        if let Ok(mut guard) = self.url.write() {
            *guard = url.into();
        }
    }

    /// Snapshot for one operation, or `None` while the URL is blank.
    #[must_use]
    pub fn config(&self) -> Option<ApiConfig> {
        ApiConfig::new(&self.get_api_url())
    }
}
