//! Per-request page parameters.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::auth::User;

/// Keys a client cannot set; they are derived while handling the request.
const RESERVED_KEYS: &[&str] = &["loggedUser", "css", "bodyClass", "content", "html", "error"];

/// Everything a page handler accumulates before rendering: the submitted
/// fields plus what the handler derives from them.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsentRequestParams {
    /// Query or form fields, passed through as-is.
    #[serde(flatten)]
    pub fields: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logged_user: Option<User>,
    /// Extra stylesheets, relative to `/css/`.
    pub css: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    /// Where to send the user once the form is submitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Set when the fields come from a submitted form (POST).
    #[serde(skip)]
    pub submitted: bool,
}

impl ConsentRequestParams {
    /// Build params from raw request fields. `redirect` is lifted into its
    /// own field and reserved keys are dropped.
    pub fn from_fields(mut fields: BTreeMap<String, String>, submitted: bool) -> Self {
        let redirect = fields.remove("redirect").filter(|r| !r.is_empty());
        fields.retain(|key, _| !RESERVED_KEYS.contains(&key.as_str()));
        Self {
            fields,
            redirect,
            submitted,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_redirect_lifted() {
        let params =
            ConsentRequestParams::from_fields(fields(&[("redirect", "/home"), ("lang", "fr")]), false);
        assert_eq!(params.redirect.as_deref(), Some("/home"));
        assert!(!params.fields.contains_key("redirect"));
        assert_eq!(params.fields["lang"], "fr");
    }

    #[test]
    fn test_empty_redirect_ignored() {
        let params = ConsentRequestParams::from_fields(fields(&[("redirect", "")]), true);
        assert!(params.redirect.is_none());
        assert!(params.submitted);
    }

    #[test]
    fn test_reserved_keys_dropped() {
        let params = ConsentRequestParams::from_fields(
            fields(&[("error", "boom"), ("html", "<b>"), ("css", "evil.css"), ("keep", "1")]),
            false,
        );
        assert!(params.error.is_none());
        assert!(params.html.is_none());
        assert!(params.css.is_empty());
        assert_eq!(params.fields.len(), 1);
    }

    #[test]
    fn test_json_shape() {
        let mut params = ConsentRequestParams::from_fields(fields(&[("foo", "bar")]), false);
        params.css.push("consent.css".into());
        params.body_class = Some("pgConsent".into());
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["foo"], "bar");
        assert_eq!(json["css"][0], "consent.css");
        assert_eq!(json["bodyClass"], "pgConsent");
        assert!(json.get("html").is_none());
        assert!(json.get("submitted").is_none());
    }
}
