//! `Link` header parsing for REST pagination

use std::sync::OnceLock;

use regex::Regex;

fn next_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r#"<([^>]+)>\s*;\s*rel="?next"?"#).ok())
        .as_ref()
}

/// URL of the `rel="next"` entry of a `Link` header, if any
pub fn next_link(header: &str) -> Option<String> {
    let pattern = next_pattern()?;
    header
        .split(',')
        .find_map(|entry| pattern.captures(entry.trim()))
        .map(|caps| caps[1].to_string())
}
