//! Cookie-carried session ids.
//!
//! Every request gets a [`CurrentSession`] extension. Requests without a valid
//! session cookie get a fresh id and a `Set-Cookie` header on the response.

use axum::{
    extract::{Request, State},
    http::{HeaderValue, header},
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use crate::session::SessionId;

use super::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentSession(pub SessionId);

pub async fn ensure_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let existing = request
        .headers()
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|raw| cookie_value(raw, &state.session_cookie))
        .and_then(SessionId::parse);

    let (session, issued) = match existing {
        Some(id) => (id, false),
        None => (SessionId::new(), true),
    };
    request.extensions_mut().insert(CurrentSession(session));

    let mut response = next.run(request).await;

    if issued {
        debug!(session = %session, "issued session cookie");
        let cookie = format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax",
            state.session_cookie, session
        );
        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
            Err(err) => warn!(error = %err, "session cookie is not a valid header value"),
        }
    }

    response
}

fn cookie_value<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header
        .split(';')
        .map(str::trim)
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}
