use std::{borrow::Cow, collections::HashSet};

use ammonia::Builder as AmmoniaBuilder;

/// Whitelist used by [`EscapePolicy::Sanitize`](crate::application::render::EscapePolicy).
///
/// Admits everything the table and markdown passes emit, plus the simple inline
/// formatting quiz authors tend to embed in prompts.
pub(crate) fn build_sanitizer() -> AmmoniaBuilder<'static> {
    let mut builder = AmmoniaBuilder::default();

    let tags: HashSet<&'static str> = HashSet::from([
        "b", "br", "code", "em", "h1", "h2", "h3", "hr", "i", "kbd", "pre", "s", "span", "strong",
        "sub", "sup", "table", "tbody", "td", "th", "thead", "tr", "u",
    ]);
    builder.tags(tags);

    let generic: HashSet<&'static str> = HashSet::from(["class"]);
    builder.generic_attributes(generic);
    builder.add_tag_attributes("span", &["style"]);
    builder.add_tag_attributes("th", &["colspan", "rowspan", "scope"]);
    builder.add_tag_attributes("td", &["colspan", "rowspan"]);

    builder.attribute_filter(|element, attribute, value| {
        if element == "span" && attribute.eq_ignore_ascii_case("style") {
            sanitize_marker_style(value).map(Cow::Owned)
        } else {
            Some(Cow::Borrowed(value))
        }
    });

    builder
}

/// Only plain `color` declarations survive on spans; that is all the marker
/// pass ever writes.
fn sanitize_marker_style(value: &str) -> Option<String> {
    let kept: Vec<&str> = value
        .split(';')
        .map(str::trim)
        .filter(|decl| is_color_declaration(decl))
        .collect();

    if kept.is_empty() {
        None
    } else {
        Some(kept.join("; "))
    }
}

fn is_color_declaration(decl: &str) -> bool {
    let Some((property, color)) = decl.split_once(':') else {
        return false;
    };
    if !property.trim().eq_ignore_ascii_case("color") {
        return false;
    }

    let color = color.trim();
    !color.is_empty()
        && color
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '#')
}
