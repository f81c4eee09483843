//! Site layout wrapped around page content.

use minijinja::{context, Environment};
use whyd_core::{Error, Result};

use crate::params::ConsentRequestParams;

/// Stylesheets every page links, before page-specific ones.
const COMMON_CSS: &[&str] = &["common.css"];

const LAYOUT_NAME: &str = "layout.html";

// `.html` turns on auto-escaping; `content` is already rendered markup.
const LAYOUT: &str = r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8">
    <title>{{ title }}</title>
{%- for css in stylesheets %}
    <link rel="stylesheet" href="/css/{{ css }}">
{%- endfor %}
  </head>
<body{% if body_class %} class="{{ body_class }}"{% endif %}>
{%- if user %}
  <header id="header"><span class="username">{{ user.name }}</span></header>
{%- endif %}
<div id="contentPane">
{{ content|safe }}
</div>
</body>
</html>
"#;

/// Wraps page content into a complete HTML document.
pub trait PageTemplate: Send + Sync {
    fn render_page(&self, params: &ConsentRequestParams) -> Result<String>;
}

/// The site's main layout: head with stylesheets, user header, content.
pub struct MainTemplate {
    title: String,
    env: Environment<'static>,
}

impl MainTemplate {
    pub fn new(title: impl Into<String>) -> Self {
        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        // The layout is a constant; a syntax error shows up on first render.
        if let Err(e) = env.add_template(LAYOUT_NAME, LAYOUT) {
            tracing::error!("Invalid layout template: {}", e);
        }
        Self {
            title: title.into(),
            env,
        }
    }
}

impl Default for MainTemplate {
    fn default() -> Self {
        Self::new("openwhyd")
    }
}

impl PageTemplate for MainTemplate {
    fn render_page(&self, params: &ConsentRequestParams) -> Result<String> {
        let stylesheets: Vec<&str> = COMMON_CSS
            .iter()
            .copied()
            .chain(params.css.iter().map(String::as_str))
            .collect();

        let tmpl = self
            .env
            .get_template(LAYOUT_NAME)
            .map_err(|e| Error::Template(e.to_string()))?;

        tmpl.render(context! {
            title => &self.title,
            stylesheets => stylesheets,
            body_class => params.body_class.as_deref(),
            user => params.logged_user.as_ref(),
            content => params.content.as_deref().unwrap_or_default(),
        })
        .map_err(|e| Error::Template(e.to_string()))
    }
}
