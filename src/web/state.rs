use std::sync::Arc;

use crate::core::IdGenerator;
use crate::session::SessionStore;

pub const DEFAULT_SESSION_COOKIE: &str = "shopping_session";

#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<dyn SessionStore>,
    pub ids: Arc<IdGenerator>,
    pub session_cookie: String,
}

impl AppState {
    pub fn new(sessions: Arc<dyn SessionStore>, ids: Arc<IdGenerator>) -> Self {
        Self {
            sessions,
            ids,
            session_cookie: DEFAULT_SESSION_COOKIE.to_string(),
        }
    }

    pub fn with_session_cookie(mut self, name: impl Into<String>) -> Self {
        self.session_cookie = name.into();
        self
    }
}
