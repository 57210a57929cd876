//! Output file naming

/// Characters kept verbatim besides ASCII/Unicode alphanumerics
const SAFE_PUNCTUATION: &str = " .-_()";

/// Replaces every character that is neither alphanumeric nor one of
/// `" .-_()"` with `_`, then trims surrounding whitespace
pub fn safe_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || SAFE_PUNCTUATION.contains(c) {
                c
            } else {
                '_'
            }
        })
        .collect::<String>()
        .trim()
        .to_string()
}

/// Last path segment of a URL or catalog file name, without query or fragment
pub fn last_segment(locator: &str) -> &str {
    let without_query = locator
        .split(['?', '#'])
        .next()
        .unwrap_or(locator);
    without_query
        .rsplit('/')
        .find(|s| !s.is_empty())
        .unwrap_or(without_query)
}
