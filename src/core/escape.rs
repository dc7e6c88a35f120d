//! Escaping helpers.

/// Escape a literal token so it matches itself inside a regex alternation.
pub fn pattern_literal(literal: &str) -> String {
    regex::escape(literal)
}

/// Join literal tokens into a single alternation, skipping empty tokens.
///
/// Returns `None` when nothing is left to match.
pub fn literal_alternation<'a, I>(literals: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let escaped: Vec<String> = literals
        .into_iter()
        .filter(|s| !s.is_empty())
        .map(pattern_literal)
        .collect();
    if escaped.is_empty() {
        None
    } else {
        Some(escaped.join("|"))
    }
}

/// Escape text so it displays literally inside HTML element content.
///
/// Only `&`, `<` and `>` are replaced; quotes are left alone since the
/// result never lands inside an attribute value.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_literal_escapes_metacharacters() {
        assert_eq!(pattern_literal("/*"), r"/\*");
        assert_eq!(pattern_literal("$"), r"\$");
        assert!(regex::Regex::new(&pattern_literal("#")).unwrap().is_match("a # b"));
        let re = regex::Regex::new(&pattern_literal("(*)")).unwrap();
        assert!(re.is_match("a (*) b"));
        assert!(!re.is_match("a () b"));
    }

    #[test]
    fn test_literal_alternation() {
        assert_eq!(literal_alternation(["\"\"\"", "'''"]).as_deref(), Some("\"\"\"|'''"));
        assert_eq!(literal_alternation(["", "//"]).as_deref(), Some("//"));
        assert_eq!(literal_alternation(Vec::<&str>::new()), None);
        assert_eq!(literal_alternation([""]), None);
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a < b && c > d"), "a &lt; b &amp;&amp; c &gt; d");
        assert_eq!(escape_html("&lt;"), "&amp;lt;");
        assert_eq!(escape_html("plain \"text\"\n"), "plain \"text\"\n");
    }
}
