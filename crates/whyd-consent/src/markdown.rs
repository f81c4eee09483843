//! Line-oriented Markdown rendering for the consent documents.
//!
//! Only the subset the consent texts use is understood: bold, italic,
//! links, list items, headings and the consent checkbox line. Each line is
//! escaped, wrapped in a paragraph, then passed through the rules below in order.
//! Later rules match tags produced by earlier ones (`<p>`, `</li></p>`), so
//! the order must not change.
//!
//! Lists are not grouped into `<ul>`: every `- ` line becomes its own `<li>`.
//! Heading levels are not kept: `#` and `###` both yield `<h1>`.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::escape::escape_html;

/// One substitution step of the renderer.
struct Rule {
    pattern: Regex,
    replacement: &'static str,
    /// Replace every match instead of the first one only.
    global: bool,
}

impl Rule {
    fn new(pattern: &str, replacement: &'static str, global: bool) -> Self {
        Self {
            pattern: Regex::new(pattern).unwrap(),
            replacement,
            global,
        }
    }

    fn apply(&self, html: &str) -> String {
        if self.global {
            self.pattern.replace_all(html, self.replacement).into_owned()
        } else {
            self.pattern.replace(html, self.replacement).into_owned()
        }
    }
}

// Compiled once, applied in this exact order.
static RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![
        // **bold**
        Rule::new(r"\*\*([^*]+)\*\*", "<strong>${1}</strong>", true),
        // *italic*, after bold so `**` pairs are already consumed
        Rule::new(r"\*([^*]+)\*", "<i>${1}</i>", true),
        // [label](url)
        Rule::new(
            r"\[([^\]]+)\]\(([^)]+)\)",
            r#"<a href="${2}" target="_blank">${1}</a>"#,
            true,
        ),
        // - [ ] consent checkbox; the paragraph stays open inside the div
        Rule::new(
            r"^<p>- \[ \] (.*)",
            r#"<div class="consent-box"><input class="checkbox" type="checkbox"><p>${1}</div>"#,
            false,
        ),
        // - list item
        Rule::new(r"^<p>- (.*)(</p>)$", "<li>${1}</li>${2}", false),
        // # heading, any level
        Rule::new(r"^<p>#+ (.*)(</p>)$", "<h1>${1}</h1>${2}", false),
        // drop the paragraph close left behind by list items and headings
        Rule::new(r"</(li|h1)></p>$", "</${1}>", false),
    ]
});

/// Render one non-empty Markdown line into one HTML fragment.
///
/// Never fails: unknown or unbalanced markup is left as escaped text.
pub fn render_line(line: &str) -> String {
    let mut html = format!("<p>{}</p>", escape_html(line));
    for rule in RULES.iter() {
        html = rule.apply(&html);
    }
    html
}

/// Render a whole document: empty lines are dropped, every other line is
/// rendered on its own, and the fragments are joined with newlines.
pub fn render_document(markdown: &str) -> String {
    markdown
        .lines()
        .filter(|line| !line.is_empty())
        .map(render_line)
        .collect::<Vec<_>>()
        .join("\n")
}
