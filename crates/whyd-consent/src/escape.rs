//! HTML escaping for text and attribute values.

/// Escape `&`, `<`, `>`, `"` and `'` so the result is inert both as element
/// text and inside a quoted attribute value.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a < b && c > d"), "a &lt; b &amp;&amp; c &gt; d");
        assert_eq!(escape_html(r#"say "hi" it's"#), "say &quot;hi&quot; it&#39;s");
    }

    #[test]
    fn test_plain_text_untouched() {
        assert_eq!(escape_html("Données personnelles"), "Données personnelles");
    }

    #[test]
    fn test_ampersand_escaped_once() {
        assert_eq!(escape_html("&lt;"), "&amp;lt;");
    }
}
