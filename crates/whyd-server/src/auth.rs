//! Login check: resolves the session cookie to a logged-in user.

use std::collections::HashMap;

use axum::http::{header, HeaderMap, Method, Uri};
use axum::response::{IntoResponse, Redirect, Response};
use parking_lot::RwLock;
use serde::Serialize;
use tracing::{info, warn};
use url::form_urlencoded;

/// A logged-in user, as exposed to pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: String,
    pub name: String,
}

/// What the login check gets to see of the incoming request.
#[derive(Debug, Clone)]
pub struct RequestInfo {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
}

impl RequestInfo {
    /// Path and query, as the client requested them.
    pub fn url(&self) -> String {
        self.uri
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| self.uri.path().to_string())
    }

    /// Value of the cookie called `name`, if sent.
    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
    }
}

/// Decides whether a request comes from a logged-in user.
///
/// On rejection the checker answers the request itself (usually a redirect
/// to the login page); callers must return that response untouched and stop.
pub trait LoginCheck: Send + Sync {
    fn check_login(&self, request: &RequestInfo) -> Result<User, Response>;
}

/// Cookie-based login check over an in-memory session registry.
pub struct SessionLogin {
    cookie_name: String,
    login_path: String,
    sessions: RwLock<HashMap<String, User>>,
}

impl SessionLogin {
    pub fn new(cookie_name: impl Into<String>, login_path: impl Into<String>) -> Self {
        Self {
            cookie_name: cookie_name.into(),
            login_path: login_path.into(),
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Register a session id for `user`.
    pub fn insert(&self, session_id: impl Into<String>, user: User) {
        let session_id = session_id.into();
        info!("Session registered for user {}", user.id);
        self.sessions.write().insert(session_id, user);
    }

    fn login_redirect(&self, request: &RequestInfo) -> Response {
        let query: String = form_urlencoded::Serializer::new(String::new())
            .append_pair("redirect", &request.url())
            .finish();
        Redirect::to(&format!("{}?{}", self.login_path, query)).into_response()
    }
}

impl LoginCheck for SessionLogin {
    fn check_login(&self, request: &RequestInfo) -> Result<User, Response> {
        let user = request
            .cookie(&self.cookie_name)
            .and_then(|sid| self.sessions.read().get(sid).cloned());

        match user {
            Some(user) => Ok(user),
            None => {
                warn!("Unauthenticated {} {}", request.method, request.uri.path());
                Err(self.login_redirect(request))
            }
        }
    }
}
