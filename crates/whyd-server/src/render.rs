//! Turns accumulated page params into exactly one response.

use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Json;
use tracing::{error, warn};
use url::{Position, Url};
use whyd_consent::DEFAULT_REDIRECT;

use crate::params::ConsentRequestParams;
use crate::template::PageTemplate;

/// Render `params`:
///
/// - an `error` is logged and the page is not wrapped in the layout;
/// - otherwise `content` is wrapped by `template` into `html`; a template
///   failure becomes the `error`.
///
/// Then a submitted form with a `redirect` is redirected, `html` is sent as
/// a page, and anything else falls back to the params as JSON.
pub fn render(mut params: ConsentRequestParams, template: &dyn PageTemplate) -> Response {
    if let Some(err) = &params.error {
        error!("Page error: {}", err);
    } else if params.content.is_some() {
        match template.render_page(&params) {
            Ok(html) => params.html = Some(html),
            Err(e) => {
                error!("Page render failed: {}", e);
                params.error = Some(e.to_string());
            }
        }
    }

    if params.submitted {
        if let Some(target) = params.redirect.as_deref() {
            return Redirect::to(&local_target(target)).into_response();
        }
    }

    match params.html.take() {
        Some(html) => Html(html).into_response(),
        None => Json(params).into_response(),
    }
}

/// Origin that redirect targets are resolved against.
const SITE_BASE: &str = "http://whyd.invalid/";

/// Only same-site paths are followed; anything else goes home.
///
/// The target is resolved the way a browser would, so tabs, newlines and
/// backslashes cannot smuggle in another host. The result is the
/// percent-encoded path, query and fragment.
fn local_target(target: &str) -> String {
    match same_site_path(target) {
        Some(path) => path,
        None => {
            warn!("Refusing off-site redirect to {:?}", target);
            DEFAULT_REDIRECT.to_string()
        }
    }
}

fn same_site_path(target: &str) -> Option<String> {
    if !target.starts_with('/') || target.chars().any(|c| c.is_ascii_control()) {
        return None;
    }
    let base = Url::parse(SITE_BASE).ok()?;
    let resolved = base.join(target).ok()?;
    if resolved.scheme() != base.scheme() || resolved.host() != base.host() {
        return None;
    }
    Some(resolved[Position::BeforePath..].to_string())
}
