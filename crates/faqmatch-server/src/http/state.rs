//! HTTP shared state

use faqmatch_core::MatcherHandle;

/// Shared application state for the HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub matcher: MatcherHandle,
}

impl AppState {
    pub fn new(matcher: MatcherHandle) -> Self {
        Self { matcher }
    }
}
