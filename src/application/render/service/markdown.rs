//! Minimal markdown pass for explanation bodies.
//!
//! This is a fixed sequence of text rewrites, not a markdown parser. Every pass
//! runs over the output of the previous one, so later passes see the markup that
//! earlier passes inserted. Code block interiors therefore still go through the
//! inline code, line break, rule and marker passes.

use once_cell::sync::Lazy;
use regex::Regex;

use super::table::LINE_BREAK;

static HEADING_3: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^### (.*)$").expect("valid regex"));
static HEADING_2: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^## (.*)$").expect("valid regex"));
static HEADING_1: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^# (.*)$").expect("valid regex"));
static BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("valid regex"));
static CODE_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```(.*?)```").expect("valid regex"));
static INLINE_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`]+)`").expect("valid regex"));

const HORIZONTAL_RULE_SOURCE: &str = "---";

/// Inline markers used by explanation templates, with the color each is shown in.
const MARKERS: [(char, &str); 3] = [
    ('\u{274C}', "#dc3545"),
    ('\u{2705}', "#28a745"),
    ('\u{1F4A1}', "#f0ad4e"),
];

pub(crate) struct MarkdownConversion {
    pub(crate) html: String,
    pub(crate) contains_code: bool,
}

/// Apply the markdown passes in their fixed order.
pub(crate) fn convert_markdown(text: &str) -> MarkdownConversion {
    let html = HEADING_3.replace_all(text, "<h3>${1}</h3>");
    let html = HEADING_2.replace_all(&html, "<h2>${1}</h2>");
    let html = HEADING_1.replace_all(&html, "<h1>${1}</h1>");
    let html = BOLD.replace_all(&html, "<strong>${1}</strong>");

    let contains_block = CODE_BLOCK.is_match(&html);
    let html = CODE_BLOCK.replace_all(&html, "<pre><code>${1}</code></pre>");
    let contains_inline = INLINE_CODE.is_match(&html);
    let html = INLINE_CODE.replace_all(&html, "<code>${1}</code>");

    let html = html.replace('\n', LINE_BREAK);
    let html = replace_rules(&html);
    let html = wrap_markers(&html);

    MarkdownConversion {
        html,
        contains_code: contains_block || contains_inline,
    }
}

/// A rule is a line holding only `---`. Newlines are already `<br>` at this
/// point, so lines are the `<br>`-delimited segments.
fn replace_rules(html: &str) -> String {
    if !html.contains(HORIZONTAL_RULE_SOURCE) {
        return html.to_string();
    }

    html.split(LINE_BREAK)
        .map(|segment| {
            if segment == HORIZONTAL_RULE_SOURCE {
                "<hr>"
            } else {
                segment
            }
        })
        .collect::<Vec<_>>()
        .join(LINE_BREAK)
}

fn wrap_markers(html: &str) -> String {
    if !html.chars().any(|ch| MARKERS.iter().any(|(marker, _)| *marker == ch)) {
        return html.to_string();
    }

    let mut wrapped = String::with_capacity(html.len() + 64);
    for ch in html.chars() {
        match MARKERS.iter().find(|(marker, _)| *marker == ch) {
            Some((marker, color)) => {
                wrapped.push_str("<span style=\"color: ");
                wrapped.push_str(color);
                wrapped.push_str("\">");
                wrapped.push(*marker);
                wrapped.push_str("</span>");
            }
            None => wrapped.push(ch),
        }
    }
    wrapped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn html(text: &str) -> String {
        convert_markdown(text).html
    }

    #[test]
    fn headings_resolve_longest_marker_first() {
        assert_eq!(
            html("### Three\n## Two\n# One"),
            "<h3>Three</h3><br><h2>Two</h2><br><h1>One</h1>"
        );
    }

    #[test]
    fn heading_needs_marker_at_line_start() {
        assert_eq!(html("see # here"), "see # here");
        assert_eq!(html("#tag"), "#tag");
    }

    #[test]
    fn bold_spans_do_not_cross_lines() {
        assert_eq!(html("**a\nb**"), "**a<br>b**");
        assert_eq!(
            html("**one** and **two**"),
            "<strong>one</strong> and <strong>two</strong>"
        );
    }

    #[test]
    fn code_block_interior_receives_later_passes() {
        let conversion = convert_markdown("```\nlet x = 1;\n```");
        assert_eq!(conversion.html, "<pre><code><br>let x = 1;<br></code></pre>");
        assert!(conversion.contains_code);
    }

    #[test]
    fn inline_code_is_wrapped() {
        let conversion = convert_markdown("use `ls -la` here");
        assert_eq!(conversion.html, "use <code>ls -la</code> here");
        assert!(conversion.contains_code);
    }

    #[test]
    fn rule_needs_a_line_of_its_own() {
        assert_eq!(html("above\n---\nbelow"), "above<br><hr><br>below");
        assert_eq!(html("---"), "<hr>");
        assert_eq!(html("a --- b"), "a --- b");
        assert_eq!(html("----"), "----");
    }

    #[test]
    fn markers_are_wrapped_individually() {
        assert_eq!(
            html("\u{274C}\u{2705}"),
            "<span style=\"color: #dc3545\">\u{274C}</span>\
             <span style=\"color: #28a745\">\u{2705}</span>"
        );
        assert!(html("\u{1F4A1} tip").starts_with("<span style=\"color: #f0ad4e\">"));
    }

    #[test]
    fn plain_text_only_gains_line_breaks() {
        let conversion = convert_markdown("line one\nline two");
        assert_eq!(conversion.html, "line one<br>line two");
        assert!(!conversion.contains_code);
    }
}
