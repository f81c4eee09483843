//! Consent page body: language flags, one form per language, toggle script.

use crate::blocks::ConsentBlocks;
use crate::escape::escape_html;
use crate::lang::Lang;

/// Where the user goes after consenting when no `redirect` was given.
pub const DEFAULT_REDIRECT: &str = "/";

/// Endpoint both consent forms submit to.
pub const CONSENT_ACTION: &str = "/consent";

// Flag click switches the visible form; checking either box enables both
// submit buttons and keeps both boxes in sync.
const TOGGLE_SCRIPT: &str = r#"<script>
  function changeLang(event) {
    document.getElementById("consent-container").setAttribute("data-lang", event.currentTarget.id);
  }
  document.getElementById("lang-en").onclick = changeLang;
  document.getElementById("lang-fr").onclick = changeLang;
  function toggleConsent(event) {
    var checked = event.currentTarget.checked;
    document.getElementById("consent-container").setAttribute("data-checked", checked);
    document.getElementsByClassName("consent-submit")[0].disabled = !checked;
    document.getElementsByClassName("consent-submit")[1].disabled = !checked;
    document.getElementsByClassName("checkbox")[0].checked = checked;
    document.getElementsByClassName("checkbox")[1].checked = checked;
  }
  document.getElementsByClassName("checkbox")[0].onchange = toggleConsent;
  document.getElementsByClassName("checkbox")[1].onchange = toggleConsent;
</script>"#;

/// The redirect target, defaulted and escaped for a quoted attribute value.
pub fn sanitize_redirect(redirect: Option<&str>) -> String {
    escape_html(redirect.unwrap_or(DEFAULT_REDIRECT))
}

/// Build the consent page body around the cached per-language blocks.
pub fn render_page_content(blocks: &ConsentBlocks, redirect: Option<&str>) -> String {
    let safe_redirect = sanitize_redirect(redirect);

    let mut lines: Vec<String> = vec![
        r#"<div class="container" id="consent-container" data-lang="lang-en">"#.into(),
        r#"  <div class="language-flags">"#.into(),
    ];
    for lang in Lang::all() {
        lines.push(format!(
            r#"    <img alt="{label}" id="lang-{code}" src="/images/lang-{code}.svg">"#,
            label = lang.flag_label(),
            code = lang.code(),
        ));
    }
    lines.push("  </div>".into());

    for &lang in Lang::all() {
        lines.push(format!(
            r#"  <form class="whitePanel lang-{}" action="{}" method="POST">"#,
            lang.code(),
            CONSENT_ACTION
        ));
        lines.push(blocks.get(lang).to_string());
        lines.push(format!(
            r#"    <input type="hidden" name="redirect" value="{safe_redirect}">"#
        ));
        lines.push(r#"    <input disabled class="consent-submit" type="submit">"#.into());
        lines.push("  </form>".into());
    }

    lines.push("</div>".into());
    lines.push(TOGGLE_SCRIPT.into());
    lines.join("\n")
}
