//! GDPR consent page.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::rejection::FormRejection;
use axum::extract::{Form, OriginalUri, State};
use axum::http::{HeaderMap, Method};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use tracing::debug;
use whyd_consent::render_page_content;

use crate::auth::RequestInfo;
use crate::params::ConsentRequestParams;
use crate::render::render;
use crate::state::AppState;

const CONSENT_CSS: &str = "consent.css";
const BODY_CLASS: &str = "pgConsent";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/consent", get(consent).post(consent))
}

/// GET /consent shows the form, POST /consent accepts it.
///
/// `Form` reads the query string on GET and the urlencoded body on POST; a
/// missing or malformed body counts as no fields at all.
async fn consent(
    State(state): State<Arc<AppState>>,
    method: Method,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    form: Result<Form<BTreeMap<String, String>>, FormRejection>,
) -> Response {
    let fields = form.map(|Form(fields)| fields).unwrap_or_default();
    let request = RequestInfo {
        method,
        uri,
        headers,
    };
    handle_consent(&state, &request, fields)
}

fn handle_consent(
    state: &AppState,
    request: &RequestInfo,
    fields: BTreeMap<String, String>,
) -> Response {
    debug!("consent {} {:?}", request.method, fields);

    let user = match state.login.check_login(request) {
        Ok(user) => user,
        Err(response) => return response,
    };

    let mut params = ConsentRequestParams::from_fields(fields, request.method == Method::POST);
    params.logged_user = Some(user.clone());
    params.css.push(CONSENT_CSS.into());
    params.body_class = Some(BODY_CLASS.into());
    params.content = Some(render_page_content(
        &state.consent_blocks,
        params.redirect.as_deref(),
    ));

    let response = render(params, state.template.as_ref());
    state.visits.add_visit(&user, &request.url());
    response
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    use crate::analytics::VisitRecorder;
    use crate::routes::build_router;
    use crate::state::test_support::{test_app, SESSION_ID};

    fn get(uri: &str, logged_in: bool) -> Request<Body> {
        let mut builder = Request::builder().method("GET").uri(uri);
        if logged_in {
            builder = builder.header(header::COOKIE, format!("whydSid={SESSION_ID}"));
        }
        builder.body(Body::empty()).unwrap()
    }

    fn post(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::COOKIE, format!("whydSid={SESSION_ID}"))
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_get_defaults_redirect_to_root() {
        let app = test_app();
        let response = build_router(app.state.clone())
            .oneshot(get("/consent", true))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert_eq!(
            html.matches(r#"<input type="hidden" name="redirect" value="/">"#).count(),
            2
        );
        assert!(html.contains(r#"<body class="pgConsent">"#));
        assert!(html.contains(r#"href="/css/consent.css""#));
        assert!(html.contains("<h1>Your data</h1>"));
        assert!(html.contains("<h1>Vos données</h1>"));
    }

    #[tokio::test]
    async fn test_get_with_redirect() {
        let app = test_app();
        let response = build_router(app.state.clone())
            .oneshot(get("/consent?redirect=/home", true))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert_eq!(
            html.matches(r#"<input type="hidden" name="redirect" value="/home">"#).count(),
            2
        );
    }

    #[tokio::test]
    async fn test_get_with_crafted_redirect_is_escaped() {
        let app = test_app();
        let response = build_router(app.state.clone())
            .oneshot(get(
                "/consent?redirect=%22%3E%3Cscript%3Ealert(1)%3C%2Fscript%3E",
                true,
            ))
            .await
            .unwrap();

        let html = body_string(response).await;
        assert!(!html.contains("<script>alert(1)"));
        assert!(html.contains(r#"value="&quot;&gt;&lt;script&gt;alert(1)&lt;/script&gt;">"#));
    }

    #[tokio::test]
    async fn test_unauthenticated_goes_to_login() {
        let app = test_app();
        let response = build_router(app.state.clone())
            .oneshot(get("/consent?redirect=/home", false))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let location = response.headers()[header::LOCATION].to_str().unwrap();
        assert!(location.starts_with("/login?redirect="));
        assert!(app.visits.recent_visits(10).is_empty());
    }

    #[tokio::test]
    async fn test_visit_recorded() {
        let app = test_app();
        build_router(app.state.clone())
            .oneshot(get("/consent?redirect=/home", true))
            .await
            .unwrap();

        let visits = app.visits.recent_visits(10);
        assert_eq!(visits.len(), 1);
        assert_eq!(visits[0].user_id, "u1");
        assert_eq!(visits[0].url, "/consent?redirect=/home");
    }

    #[tokio::test]
    async fn test_post_redirects_after_consent() {
        let app = test_app();
        let response = build_router(app.state.clone())
            .oneshot(post("/consent", "redirect=%2Fhome"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/home");
        assert_eq!(app.visits.visit_counts()["/consent"], 1);
    }

    #[tokio::test]
    async fn test_post_off_site_redirect_goes_home() {
        let app = test_app();
        let response = build_router(app.state.clone())
            .oneshot(post("/consent", "redirect=https%3A%2F%2Fevil.example"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/");
    }

    #[tokio::test]
    async fn test_post_tab_smuggled_host_goes_home() {
        let app = test_app();
        let response = build_router(app.state.clone())
            .oneshot(post("/consent", "redirect=%2F%09%2Fevil.example"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/");
    }

    #[tokio::test]
    async fn test_post_newline_redirect_goes_home() {
        let app = test_app();
        let response = build_router(app.state.clone())
            .oneshot(post("/consent", "redirect=%2Fa%0Ab"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/");
    }

    #[tokio::test]
    async fn test_post_non_ascii_redirect_is_encoded() {
        let app = test_app();
        let response = build_router(app.state.clone())
            .oneshot(post("/consent", "redirect=%2Fcaf%C3%A9"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/caf%C3%A9");
    }

    #[tokio::test]
    async fn test_post_without_body_renders_page() {
        let app = test_app();
        let request = Request::builder()
            .method("POST")
            .uri("/consent?redirect=/ignored")
            .header(header::COOKIE, format!("whydSid={SESSION_ID}"))
            .body(Body::empty())
            .unwrap();
        let response = build_router(app.state.clone()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert_eq!(html.matches(r#"name="redirect" value="/">"#).count(), 2);
    }
}
