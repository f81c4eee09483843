//! Visit statistics.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::{OriginalUri, State};
use axum::http::{HeaderMap, Method};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};

use crate::auth::RequestInfo;
use crate::state::AppState;

const RECENT_VISITS: usize = 20;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/visits", get(get_visits))
}

/// GET /api/visits: visit counts per path and the caller's own latest visits.
///
/// Requires a login. Query strings are left out of the counts and other
/// users' visits are never listed.
async fn get_visits(
    State(state): State<Arc<AppState>>,
    method: Method,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
) -> Response {
    let request = RequestInfo {
        method,
        uri,
        headers,
    };
    let user = match state.login.check_login(&request) {
        Ok(user) => user,
        Err(response) => return response,
    };

    let mut by_path: BTreeMap<String, usize> = BTreeMap::new();
    for (url, count) in state.visits.visit_counts() {
        let path = url.split_once('?').map_or(url.as_str(), |(path, _)| path);
        *by_path.entry(path.to_string()).or_insert(0) += count;
    }
    let total: usize = by_path.values().sum();

    Json(serde_json::json!({
        "total": total,
        "byPath": by_path,
        "recent": state.visits.user_visits(&user.id, RECENT_VISITS),
    }))
    .into_response()
}
