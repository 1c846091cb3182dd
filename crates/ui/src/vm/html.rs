use std::collections::HashSet;

/// Clean bank-supplied markup down to inline formatting.
///
/// Question banks are authored by hand and sometimes carry `<code>`, `<b>` or
/// line breaks inside option text. Anything else (scripts, links, styles,
/// event attributes) is dropped.
#[must_use]
pub fn sanitize_html(html: &str) -> String {
    let tags: HashSet<&str> = [
        "b", "strong", "i", "em", "u", "sub", "sup", "code", "pre", "br", "span",
    ]
    .into_iter()
    .collect();

    ammonia::Builder::new()
        .tags(tags)
        .clean(html)
        .to_string()
}
