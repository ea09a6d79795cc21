use std::borrow::Cow;

/// Replace reserved HTML characters with entities. Returns the input untouched
/// when nothing needs escaping.
pub(crate) fn escape_html(value: &str) -> Cow<'_, str> {
    if !value
        .chars()
        .any(|ch| matches!(ch, '&' | '<' | '>' | '"' | '\''))
    {
        return Cow::Borrowed(value);
    }

    let mut escaped = String::with_capacity(value.len() + 16);
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    Cow::Owned(escaped)
}
