//! URL pattern matching for descriptors.

use regex::Regex;

/// Test a descriptor pattern against a rendered request URL.
///
/// The pattern is a regular expression searched anywhere in the URL; anchor it
/// with `^`/`$` to pin it. An empty pattern matches every URL.
pub fn url_matches(pattern: &str, url: &str) -> Result<bool, regex::Error> {
    if pattern.is_empty() {
        return Ok(true);
    }
    let regex = Regex::new(pattern)?;
    Ok(regex.is_match(url))
}

/// Strip carriage returns and line feeds so a URL cannot forge log lines.
pub fn sanitize_url(url: &str) -> String {
    url.chars().filter(|c| !matches!(c, '\r' | '\n')).collect()
}
